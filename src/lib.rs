pub mod actions;
pub mod context;
pub mod engine;
pub mod error;
pub mod focus;
pub mod gate;
pub mod key;
pub mod keymap;
pub mod machine;
pub mod parser;
pub mod repeat;
pub mod resolver;
pub mod search;
pub mod stack;
pub mod state;
pub mod traits;
pub mod types;
pub mod workspace;

pub use crate::context::{ContextResolver, InteractionContext};
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot, EventOutcome};
pub use crate::error::{FocusError, ValidationError};
pub use crate::focus::FocusBroker;
pub use crate::key::{InputEvent, KeyCategory, KeyCode, KeyEvent, Modifiers};
pub use crate::keymap::{Action, CommandContext, CommandResult, KeyTrie, KeyTrieNode, Keymaps};
pub use crate::parser::{Operand, ParsedCommand};
pub use crate::state::{EngineState, Settings};
pub use crate::traits::{ElementKind, ElementTree};
pub use crate::types::{Command, LastChange, Mode, SearchDirection, VisualSelection};
