use std::fmt;

/// The current mode of the engine.
///
/// The same keys perform different actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Normal mode - for navigation and operators.
    #[default]
    Normal,
    /// Insert mode - the host is editing an item; only escape is handled.
    Insert,
    /// Visual mode - navigation extends a range selection.
    Visual,
    /// Command mode - the host's `:` input has focus.
    Command,
    /// Search mode - printable keys accumulate into the pattern.
    Search,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Insert => "insert",
            Mode::Visual => "visual",
            Mode::Command => "command",
            Mode::Search => "search",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A visual selection over stack positions.
///
/// Both bounds are inclusive and 1-based. `start` is the anchor and may be
/// greater than `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualSelection {
    pub start: usize,
    pub end: usize,
}

impl VisualSelection {
    pub const fn at(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// The selection as an ordered `(low, high)` pair.
    pub fn ordered(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Number of positions covered, bounds included.
    pub fn span(&self) -> usize {
        let (low, high) = self.ordered();
        high - low + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// An executed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub pattern: String,
    pub direction: SearchDirection,
}

/// The last change-class command, replayed by dot-repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastChange {
    /// The raw command buffer, without any register prefix.
    pub command: String,
    pub count: Option<u32>,
    pub register: Option<String>,
}

/// Semantic commands emitted by the engine for the host to execute.
///
/// These describe intent only. The engine tracks where the cursor sits and
/// how deep the stack is, but the host owns the items and performs every
/// data movement. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveToPosition {
        position: usize,
    },
    MoveRelative {
        offset: i64,
    },
    MoveToTop,
    MoveToBottom,
    /// Move to the item the host knows by `name`.
    MoveToNamed {
        name: String,
    },

    DeleteItems {
        positions: Vec<usize>,
        to_register: String,
    },
    YankItems {
        positions: Vec<usize>,
        to_register: String,
    },
    PasteItems {
        from_register: String,
        position: usize,
        count: u32,
    },
    SwapItems {
        positions: Vec<usize>,
    },
    RotateItems {
        positions: Vec<usize>,
    },
    DeleteToPosition {
        positions: Vec<usize>,
        target: usize,
        to_register: String,
    },
    YankToPosition {
        positions: Vec<usize>,
        target: usize,
        to_register: String,
    },
    /// Open a new item next to `position` and start editing it.
    OpenItem {
        position: usize,
        above: bool,
    },
    /// Replace the items at `positions`; the host starts editing.
    ChangeItems {
        positions: Vec<usize>,
        to_register: String,
    },

    Search {
        pattern: String,
        direction: SearchDirection,
    },
    NextMatch {
        reverse: bool,
    },
    /// Replay `change`. The listener performs the replay.
    DotRepeat {
        change: LastChange,
    },

    SwitchWorkspace {
        name: String,
    },
    ListWorkspaces,
    CreateWorkspace {
        name: String,
    },

    ModeChange {
        mode: Mode,
    },
    CommandBufferUpdate {
        buffer: String,
    },
    SelectionChange {
        selection: Option<VisualSelection>,
    },
}
