/// Key codes representing individual keys on the keyboard.
///
/// This enum provides a platform-agnostic representation of keys.
/// Hosts should map their platform-specific key events to these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key. Hosts deliver the character as typed,
    /// so `G` arrives as `Char('G')` rather than `Char('g')` plus SHIFT.
    Char(char),
    /// The Escape key, used to exit modes and cancel pending input.
    Esc,
    /// The Enter/Return key.
    Enter,
    /// The Backspace key for deleting characters from a search pattern.
    Backspace,
    Tab,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// A function key, `F(1)` through `F(24)`.
    F(u8),
}

impl KeyCode {
    /// The `<Name>` used for non-printable keys in key tokens.
    fn token_name(self) -> Option<String> {
        let name = match self {
            KeyCode::Char(_) => return None,
            KeyCode::Esc => "Escape",
            KeyCode::Enter => "Enter",
            KeyCode::Backspace => "Backspace",
            KeyCode::Tab => "Tab",
            KeyCode::Delete => "Delete",
            KeyCode::Up => "Up",
            KeyCode::Down => "Down",
            KeyCode::Left => "Left",
            KeyCode::Right => "Right",
            KeyCode::Home => "Home",
            KeyCode::End => "End",
            KeyCode::PageUp => "PageUp",
            KeyCode::PageDown => "PageDown",
            KeyCode::F(n) => return Some(format!("<F{n}>")),
        };
        Some(format!("<{name}>"))
    }
}

bitflags::bitflags! {
    /// Keyboard modifier flags.
    ///
    /// These can be combined to represent multiple modifiers held simultaneously.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

/// A key press event with optional modifiers.
///
/// This represents a single key press, including any modifier keys held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the key press.
    pub mods: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// A key press without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Whether a chord modifier (ctrl, alt or meta) is held.
    pub fn has_chord_modifier(&self) -> bool {
        self.mods
            .intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::META)
    }

    /// The printable character this event would type, if any.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.has_chord_modifier() && !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Input events that can be processed by the engine.
///
/// This enum distinguishes between key presses (used for commands)
/// and text input (used while typing a search pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press event, typically used for commands and navigation.
    Key(KeyEvent),
    /// A character received as text input.
    /// This allows hosts to handle composed characters and IME input.
    ReceivedChar(char),
}

impl InputEvent {
    /// The key event equivalent of this input. Received characters behave
    /// like an unmodified key press of that character.
    pub fn key_event(&self) -> KeyEvent {
        match self {
            InputEvent::Key(ke) => *ke,
            InputEvent::ReceivedChar(c) => KeyEvent::plain(KeyCode::Char(*c)),
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(ke: KeyEvent) -> Self {
        InputEvent::Key(ke)
    }
}

/// Coarse classification of a key, used by the gatekeeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    Navigation,
    Editing,
    Meta,
    Escape,
    Submit,
    TextInput,
}

const NAVIGATION_CHARS: &str = "hjklgGnN";
const EDITING_CHARS: &str = "dDyYpPxXoOcCsSrRuJ.+-*<>";
const META_CHARS: &str = ":/?@\"',;&";

/// Classifies a key event into its [`KeyCategory`].
///
/// Letters are always command keys; digits, whitespace and unassigned
/// punctuation are text input.
pub fn classify(event: &KeyEvent) -> KeyCategory {
    match event.code {
        KeyCode::Esc => KeyCategory::Escape,
        KeyCode::Char('[') if event.mods.contains(Modifiers::CTRL) => KeyCategory::Escape,
        KeyCode::Enter => KeyCategory::Submit,
        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown => KeyCategory::Navigation,
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Tab => KeyCategory::Editing,
        KeyCode::F(_) => KeyCategory::Meta,
        KeyCode::Char(_) if event.has_chord_modifier() => KeyCategory::Meta,
        KeyCode::Char(c) if NAVIGATION_CHARS.contains(c) => KeyCategory::Navigation,
        KeyCode::Char(c) if EDITING_CHARS.contains(c) => KeyCategory::Editing,
        KeyCode::Char(c) if META_CHARS.contains(c) || c.is_ascii_alphabetic() => {
            KeyCategory::Meta
        }
        KeyCode::Char(_) => KeyCategory::TextInput,
    }
}

/// Produces the canonical token for a key event.
///
/// Printable keys become themselves (`j`, `G`, `,`), other keys become
/// `<Name>` (`<Escape>`, `<Down>`). Held modifiers are prefixed as `C-`,
/// `A-`, `M-` and `S-`; shift is omitted for single characters since the
/// character already carries it.
pub fn key_token(event: &KeyEvent) -> String {
    if matches!(event.code, KeyCode::Char('[')) && event.mods.contains(Modifiers::CTRL) {
        return "<Escape>".to_string();
    }

    let (base, single_char) = match (event.code, event.code.token_name()) {
        (_, Some(name)) => (name, false),
        (KeyCode::Char(c), None) => (c.to_string(), true),
        (_, None) => (String::new(), false),
    };

    let mut token = String::with_capacity(base.len() + 6);
    if event.mods.contains(Modifiers::CTRL) {
        token.push_str("C-");
    }
    if event.mods.contains(Modifiers::ALT) {
        token.push_str("A-");
    }
    if event.mods.contains(Modifiers::META) {
        token.push_str("M-");
    }
    if event.mods.contains(Modifiers::SHIFT) && !single_char {
        token.push_str("S-");
    }
    token.push_str(&base);
    token
}

/// Splits a command buffer back into the key tokens it was built from.
///
/// A token is a `<Name>` group or a single character, optionally preceded
/// by modifier prefixes (`C-`, `A-`, `M-`, `S-`).
///
/// The split is lossy: the characters `C`, `-`, `j` typed one by one come
/// back as the chord `C-j`. The engine resolves from the tokens it recorded
/// as they were typed and only string-only callers go through here.
pub fn tokenize(buffer: &str) -> Vec<&str> {
    let bytes = buffer.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;

    while start < buffer.len() {
        let mut cursor = start;
        while cursor + 2 < buffer.len()
            && matches!(bytes[cursor], b'C' | b'A' | b'M' | b'S')
            && bytes[cursor + 1] == b'-'
        {
            cursor += 2;
        }

        let rest = &buffer[cursor..];
        let len = if rest.starts_with('<') {
            rest.find('>').map(|i| i + 1)
        } else {
            None
        }
        .or_else(|| rest.chars().next().map(char::len_utf8))
        .unwrap_or(0);

        let end = cursor + len;
        tokens.push(&buffer[start..end]);
        start = end;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_mixed_buffer() {
        assert_eq!(tokenize("3dd"), vec!["3", "d", "d"]);
        assert_eq!(tokenize("<Down>C-<Enter>x"), vec!["<Down>", "C-<Enter>", "x"]);
        assert_eq!(tokenize("C-r"), vec!["C-r"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn lone_angle_bracket_is_a_character() {
        assert_eq!(tokenize("<"), vec!["<"]);
        assert_eq!(tokenize("<a"), vec!["<", "a"]);
    }
}
