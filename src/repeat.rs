//! Dot-repeat recording.
//!
//! Only change-class commands are remembered: delete, yank, paste, open,
//! change, substitute and rotate, each with an optional count (or range)
//! prefix and an optional `<digits>g` position suffix.

use std::sync::LazyLock;

use regex::RegexSet;

use crate::state::EngineState;
use crate::types::{Command, LastChange};

static CHANGE_GRAMMAR: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^(?:\d+(?:,\d+)?)?(?:dd|d|xx|x|X|D)(?:\d+g)?$",
        r"^(?:\d+(?:,\d+)?)?(?:yy|y|Y)(?:\d+g)?$",
        r"^\d*[pP]$",
        r"^\d*[oO]$",
        r"^(?:\d+(?:,\d+)?)?(?:cc|c|C)(?:\d+g)?$",
        r"^\d*[sS]$",
        r"^\d*r\w?$",
    ])
    .expect("static pattern")
});

/// Whether `command` belongs to the repeatable change grammar.
pub fn should_record(command: &str) -> bool {
    CHANGE_GRAMMAR.is_match(command)
}

/// Stores `command` as the last change when it is repeatable; otherwise
/// the state comes back unchanged.
pub fn record_change(
    state: &EngineState,
    command: &str,
    count: Option<u32>,
    register: Option<&str>,
) -> EngineState {
    let mut next = state.clone();
    if should_record(command) {
        tracing::trace!(command, ?count, ?register, "recorded change for dot-repeat");
        next.last_change = Some(LastChange {
            command: command.to_string(),
            count,
            register: register.map(str::to_string),
        });
    }
    next
}

/// Asks listeners to replay the last change, if there is one.
pub fn execute_dot_repeat(state: &EngineState) -> Option<Command> {
    state
        .last_change
        .clone()
        .map(|change| Command::DotRepeat { change })
}
