//! Search submode.
//!
//! `/` or `?` enters search mode, printable keys grow the pattern, `<Enter>`
//! emits the search and `<Escape>` abandons it.

use unicode_segmentation::UnicodeSegmentation;

use crate::key::{InputEvent, KeyCode};
use crate::state::EngineState;
use crate::types::{Command, Mode, SearchDirection, SearchQuery};

pub fn start_search(state: &EngineState, direction: SearchDirection) -> EngineState {
    let mut next = state.clone();
    next.mode = Mode::Search;
    next.clear_buffer();
    next.visual_selection = None;
    next.search_pattern = Some(String::new());
    next.search_direction = Some(direction);
    next
}

pub fn append_to_pattern(state: &EngineState, text: &str) -> EngineState {
    let mut next = state.clone();
    next.search_pattern
        .get_or_insert_with(String::new)
        .push_str(text);
    next
}

/// Removes the last grapheme of the pattern. An empty pattern is left as is.
pub fn backspace(state: &EngineState) -> EngineState {
    let mut next = state.clone();
    if let Some(pattern) = next.search_pattern.as_mut()
        && let Some((idx, _)) = pattern.grapheme_indices(true).next_back()
    {
        pattern.truncate(idx);
    }
    next
}

/// Abandons the pattern being typed and returns to normal mode. A search
/// executed earlier stays available to `n`/`N`.
pub fn cancel_search(state: &EngineState) -> EngineState {
    let mut next = state.clone();
    next.mode = Mode::Normal;
    next.search_pattern = None;
    next.search_direction = None;
    next
}

/// Submits the pattern. An empty pattern behaves like a cancel.
pub fn execute_search(state: &EngineState) -> (EngineState, Option<Command>) {
    let pattern = state.search_pattern.clone().unwrap_or_default();
    if pattern.is_empty() {
        return (cancel_search(state), None);
    }

    let direction = state.search_direction.unwrap_or(SearchDirection::Forward);
    let mut next = state.clone();
    next.mode = Mode::Normal;
    next.search_direction = Some(direction);
    next.last_search = Some(SearchQuery {
        pattern: pattern.clone(),
        direction,
    });
    (next, Some(Command::Search { pattern, direction }))
}

/// Jumps to the next (or previous) match of the last executed search.
/// Does nothing when no search has run yet.
pub fn navigate_match(state: &EngineState, reverse: bool) -> Option<Command> {
    state
        .last_search
        .as_ref()
        .map(|_| Command::NextMatch { reverse })
}

/// Routes one input event while in search mode.
pub fn handle_search_input(state: &EngineState, input: &InputEvent) -> (EngineState, Option<Command>) {
    match input {
        InputEvent::ReceivedChar(c) => (append_to_pattern(state, &c.to_string()), None),
        InputEvent::Key(ke) => match ke.code {
            KeyCode::Esc => (cancel_search(state), None),
            KeyCode::Char('[') if ke.has_chord_modifier() => (cancel_search(state), None),
            KeyCode::Enter => execute_search(state),
            KeyCode::Backspace => (backspace(state), None),
            _ => match ke.printable() {
                Some(c) => (append_to_pattern(state, &c.to_string()), None),
                None => (state.clone(), None),
            },
        },
    }
}
