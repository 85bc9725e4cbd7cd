//! The mode state machine as a pure reducer.
//!
//! [`reduce`] takes the current state and one input event and returns the
//! next state together with every semantic command the transition produced.
//! It never mutates its inputs and never calls out to listeners.

use crate::key::{InputEvent, key_token};
use crate::keymap::{KeyTrieNode, Keymaps};
use crate::resolver::{self, Resolution, Resolved};
use crate::search;
use crate::state::{EngineState, Settings};
use crate::types::{Command, Mode};

const ESCAPE: &str = "<Escape>";

/// One reducer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: EngineState,
    /// The executed command's own output first, then notifications.
    pub commands: Vec<Command>,
}

pub fn reduce(
    state: &EngineState,
    keymaps: &Keymaps,
    settings: &Settings,
    input: &InputEvent,
) -> Step {
    let (next, command) = match keymaps.for_mode(state.mode) {
        None => search::handle_search_input(state, input),
        Some(keymap) => {
            let token = key_token(&input.key_event());
            match state.mode {
                Mode::Normal | Mode::Visual if token != ESCAPE => {
                    accumulate(state, keymap, settings, &token)
                }
                _ => single_key(state, keymap, settings, &token),
            }
        }
    };

    if next.mode != state.mode {
        tracing::debug!(from = %state.mode, to = %next.mode, "mode transition");
    }
    let commands = notifications(state, &next, command);
    Step {
        state: next,
        commands,
    }
}

/// Appends `token` to the buffer and resolves it.
fn accumulate(
    state: &EngineState,
    keymap: &KeyTrieNode,
    settings: &Settings,
    token: &str,
) -> (EngineState, Option<Command>) {
    let mut keys = state.pending_keys.clone();
    keys.push(token.to_string());
    match resolver::resolve_keys(&keys, keymap) {
        Resolution::Resolved(resolved) => resolver::execute(state, &resolved, settings),
        Resolution::Partial => {
            let mut next = state.clone();
            next.command_buffer = keys.concat();
            next.pending_keys = keys;
            tracing::trace!(buffer = %next.command_buffer, "partial command");
            (next, None)
        }
        Resolution::Invalid => {
            tracing::trace!(buffer = %keys.concat(), "discarded unresolvable buffer");
            let mut next = state.clone();
            next.clear_buffer();
            (next, None)
        }
    }
}

/// Looks `token` up on its own, discarding any buffer. Escape falls back to
/// clearing the buffer and pending count when the keymap does not bind it.
fn single_key(
    state: &EngineState,
    keymap: &KeyTrieNode,
    settings: &Settings,
    token: &str,
) -> (EngineState, Option<Command>) {
    match keymap.action(token) {
        Some(action) => resolver::execute(state, &Resolved::bare(action, token), settings),
        None if token == ESCAPE => {
            let mut next = state.clone();
            next.clear_buffer();
            next.pending_count = None;
            (next, None)
        }
        None => (state.clone(), None),
    }
}

fn notifications(
    before: &EngineState,
    after: &EngineState,
    command: Option<Command>,
) -> Vec<Command> {
    let mut commands: Vec<Command> = command.into_iter().collect();
    if after.visual_selection != before.visual_selection {
        commands.push(Command::SelectionChange {
            selection: after.visual_selection,
        });
    }
    if after.mode != before.mode {
        commands.push(Command::ModeChange { mode: after.mode });
    }
    if after.command_buffer != before.command_buffer {
        commands.push(Command::CommandBufferUpdate {
            buffer: after.command_buffer.clone(),
        });
    }
    commands
}
