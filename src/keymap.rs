//! Keymap tries.
//!
//! A keymap maps key tokens to either an executable [`Action`] or a nested
//! node awaiting more keys. Node keys are single key tokens (`j`,
//! `<Escape>`, `C-r`) or parser lookup keys (`gg`, `dg`) that structured
//! commands are resolved under.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::parser::Operand;
use crate::state::{EngineState, Settings};
use crate::types::{Command, Mode};

/// Everything a command function sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub state: &'a EngineState,
    /// Count from the buffer or the pending count, if any was given.
    pub count: Option<u32>,
    /// Register selected with a `"x` prefix for this command only.
    pub register: Option<&'a str>,
    /// Operand recognised by the stack-command parser.
    pub operand: Option<&'a Operand>,
    pub settings: &'a Settings,
}

impl CommandContext<'_> {
    /// The count, defaulting to 1.
    pub fn count(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}

/// What a command function produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Replacement state; `None` keeps the current one.
    pub state: Option<EngineState>,
    pub command: Option<Command>,
}

impl CommandResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_state(state: EngineState) -> Self {
        Self {
            state: Some(state),
            command: None,
        }
    }

    pub fn emit(state: EngineState, command: Command) -> Self {
        Self {
            state: Some(state),
            command: Some(command),
        }
    }
}

type ActionFn = dyn Fn(&CommandContext<'_>) -> CommandResult + Send + Sync;

/// A named command function bound in a keymap.
#[derive(Clone)]
pub struct Action {
    name: &'static str,
    run: Arc<ActionFn>,
}

impl Action {
    pub fn new<F>(name: &'static str, run: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            name,
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, ctx: &CommandContext<'_>) -> CommandResult {
        (self.run)(ctx)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.name).finish()
    }
}

#[derive(Debug, Clone)]
pub enum KeyTrie {
    Leaf(Action),
    Branch(KeyTrieNode),
}

impl KeyTrie {
    pub fn leaf<F>(name: &'static str, run: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> CommandResult + Send + Sync + 'static,
    {
        KeyTrie::Leaf(Action::new(name, run))
    }
}

/// Result of walking a token sequence through a trie.
#[derive(Debug, Clone, Copy)]
pub enum TrieMatch<'a> {
    Leaf(&'a Action),
    Partial,
    NoMatch,
}

#[derive(Debug, Clone, Default)]
pub struct KeyTrieNode {
    name: String,
    map: HashMap<String, KeyTrie>,
}

impl KeyTrieNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds `key`, returning any previous binding.
    pub fn insert(&mut self, key: impl Into<String>, trie: KeyTrie) -> Option<KeyTrie> {
        self.map.insert(key.into(), trie)
    }

    pub fn remove(&mut self, key: &str) -> Option<KeyTrie> {
        self.map.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&KeyTrie> {
        self.map.get(key)
    }

    /// The action bound directly under `key`, ignoring nested nodes.
    pub fn action(&self, key: &str) -> Option<&Action> {
        match self.map.get(key)? {
            KeyTrie::Leaf(action) => Some(action),
            KeyTrie::Branch(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Layers `other` over this node. Leaves in `other` replace whatever
    /// they collide with; nested nodes merge recursively.
    pub fn merge(&mut self, other: KeyTrieNode) {
        for (key, theirs) in other.map {
            match (self.map.get_mut(&key), theirs) {
                (Some(KeyTrie::Branch(ours)), KeyTrie::Branch(theirs)) => ours.merge(theirs),
                (_, theirs) => {
                    self.map.insert(key, theirs);
                }
            }
        }
    }

    /// Walks `tokens` one at a time from this node.
    ///
    /// A leaf is only a match when it consumes the last token; hitting a
    /// leaf early means the sequence overshot it.
    pub fn traverse<'a, I>(&'a self, tokens: I) -> TrieMatch<'a>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut node = self;
        let mut tokens = tokens.into_iter().peekable();
        if tokens.peek().is_none() {
            return TrieMatch::NoMatch;
        }

        while let Some(token) = tokens.next() {
            match node.map.get(token.as_ref()) {
                None => return TrieMatch::NoMatch,
                Some(KeyTrie::Leaf(action)) => {
                    return if tokens.peek().is_none() {
                        TrieMatch::Leaf(action)
                    } else {
                        TrieMatch::NoMatch
                    };
                }
                Some(KeyTrie::Branch(next)) => node = next,
            }
        }
        TrieMatch::Partial
    }
}

/// One keymap per mode that resolves keys. Search mode is handled by the
/// search submode directly and has no keymap.
#[derive(Debug, Clone)]
pub struct Keymaps {
    pub normal: KeyTrieNode,
    pub insert: KeyTrieNode,
    pub visual: KeyTrieNode,
    pub command: KeyTrieNode,
}

impl Keymaps {
    pub fn for_mode(&self, mode: Mode) -> Option<&KeyTrieNode> {
        match mode {
            Mode::Normal => Some(&self.normal),
            Mode::Insert => Some(&self.insert),
            Mode::Visual => Some(&self.visual),
            Mode::Command => Some(&self.command),
            Mode::Search => None,
        }
    }

    pub fn for_mode_mut(&mut self, mode: Mode) -> Option<&mut KeyTrieNode> {
        match mode {
            Mode::Normal => Some(&mut self.normal),
            Mode::Insert => Some(&mut self.insert),
            Mode::Visual => Some(&mut self.visual),
            Mode::Command => Some(&mut self.command),
            Mode::Search => None,
        }
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        crate::actions::default_keymaps()
    }
}
