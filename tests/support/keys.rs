use vim_stack::{Command, Engine, InputEvent, KeyCode, KeyEvent, Modifiers};

pub fn key(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent {
        code: KeyCode::Char(c),
        mods: Modifiers::empty(),
    })
}

pub fn ctrl(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent::new(KeyCode::Char(c), Modifiers::CTRL))
}

pub fn esc() -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Esc))
}

pub fn enter() -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Enter))
}

pub fn backspace() -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Backspace))
}

pub fn down() -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Down))
}

pub fn up() -> InputEvent {
    InputEvent::Key(KeyEvent::plain(KeyCode::Up))
}

/// Types `keys` into the stack one character at a time and collects every
/// command the engine emitted.
pub fn feed(engine: &mut Engine, keys: &str) -> Vec<Command> {
    keys.chars()
        .flat_map(|c| engine.handle_key(key(c)).commands)
        .collect()
}

/// The commands in `commands` that are not mode, buffer or selection
/// notifications.
pub fn semantic(commands: &[Command]) -> Vec<Command> {
    commands
        .iter()
        .filter(|command| {
            !matches!(
                command,
                Command::ModeChange { .. }
                    | Command::CommandBufferUpdate { .. }
                    | Command::SelectionChange { .. }
            )
        })
        .cloned()
        .collect()
}
