use thiserror::Error;

/// Why a parsed stack command cannot run against the current stack.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("position {position} is out of range (stack depth {depth})")]
    OutOfRange { position: usize, depth: usize },

    #[error("stack underflow: {requested} items requested, {available} available")]
    Underflow { requested: usize, available: usize },
}

/// Focus broker error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("component `{0}` is not registered")]
    UnknownComponent(String),
}
