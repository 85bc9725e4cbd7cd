use std::collections::HashMap;

use crate::types::{LastChange, Mode, SearchDirection, SearchQuery, VisualSelection};

/// The unnamed register, targeted when no register is selected.
pub const UNNAMED_REGISTER: &str = "\"";

/// Default number of items `r` rotates.
pub const DEFAULT_ROTATE_COUNT: u32 = 3;

/// Tunables handed to every command function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub rotate_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rotate_count: DEFAULT_ROTATE_COUNT,
        }
    }
}

/// Everything the engine knows.
///
/// The stack itself belongs to the host. `stack_position` and
/// `stack_depth` are the engine's belief about it, kept in sync through
/// [`EngineState::with_depth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub mode: Mode,
    /// Keys of a multi-key command that has not resolved yet.
    pub command_buffer: String,
    /// The key tokens `command_buffer` was typed as. Kept alongside the
    /// string since `C-j` typed as three characters and as one chord read
    /// the same once joined.
    pub pending_keys: Vec<String>,
    /// Count entered outside the buffer; used when the buffer has none.
    pub pending_count: Option<u32>,
    /// Register targeted by the last register-aware command.
    pub active_register: Option<String>,
    pub last_command: Option<String>,
    /// Bumped on every executed command, even when nothing else changed.
    pub last_command_tick: u64,
    /// 1-based cursor position.
    pub stack_position: usize,
    pub stack_depth: usize,
    pub visual_selection: Option<VisualSelection>,
    /// Register contents, filled in by the host.
    pub registers: HashMap<String, Vec<String>>,
    /// Pattern being typed, or the one just executed.
    pub search_pattern: Option<String>,
    pub search_direction: Option<SearchDirection>,
    pub last_search: Option<SearchQuery>,
    pub last_change: Option<LastChange>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            command_buffer: String::new(),
            pending_keys: Vec::new(),
            pending_count: None,
            active_register: None,
            last_command: None,
            last_command_tick: 0,
            stack_position: 1,
            stack_depth: 0,
            visual_selection: None,
            registers: HashMap::new(),
            search_pattern: None,
            search_direction: None,
            last_search: None,
            last_change: None,
        }
    }
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `depth` as the new stack depth, clamping the
    /// position and any visual selection into the new bounds.
    pub fn with_depth(&self, depth: usize) -> Self {
        let mut next = self.clone();
        next.stack_depth = depth;
        next.stack_position = clamp_index(self.stack_position, depth);
        next.visual_selection = self.visual_selection.map(|sel| VisualSelection {
            start: clamp_index(sel.start, depth),
            end: clamp_index(sel.end, depth),
        });
        next
    }

    /// Drops a half-typed command.
    pub fn clear_buffer(&mut self) {
        self.command_buffer.clear();
        self.pending_keys.clear();
    }

    /// The register commands target when none was selected explicitly.
    pub fn register_or_default(&self) -> &str {
        self.active_register.as_deref().unwrap_or(UNNAMED_REGISTER)
    }

    pub fn register(&self, name: &str) -> Option<&[String]> {
        self.registers.get(name).map(Vec::as_slice)
    }
}

/// Clamps a (possibly negative or oversized) position into `[1, depth]`.
/// An empty stack keeps the cursor at 1.
pub fn clamp_position(position: i64, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }
    let depth = i64::try_from(depth).unwrap_or(i64::MAX);
    position.clamp(1, depth) as usize
}

/// Clamps a 1-based position into `[1, depth]` without leaving `usize`.
pub fn clamp_index(position: usize, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }
    position.clamp(1, depth)
}

/// Converts a typed position to the signed space motions work in. Anything
/// past `i64::MAX` is still "beyond the top".
pub fn signed_position(position: usize) -> i64 {
    i64::try_from(position).unwrap_or(i64::MAX)
}
