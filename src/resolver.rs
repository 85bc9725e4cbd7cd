//! Command-buffer resolution.
//!
//! A buffer is resolved in three steps:
//!
//! 1. An optional `"x` register prefix is split off the typed key tokens.
//! 2. The stack-command parser runs on the rest. A structured form whose
//!    operator is bound to an action in the keymap resolves immediately.
//! 3. Otherwise the buffer either could still grow into a structured form
//!    (partial), or it is walked token by token through the keymap trie with
//!    any leading digits taken as the count.

use crate::key::tokenize;
use crate::keymap::{Action, CommandContext, KeyTrie, KeyTrieNode, TrieMatch};
use crate::parser::{self, Operand, ParsedCommand};
use crate::repeat;
use crate::state::{EngineState, Settings, UNNAMED_REGISTER};
use crate::types::Command;

/// A buffer that names an action, with everything needed to run it.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub action: &'a Action,
    /// The full buffer as typed.
    pub raw: String,
    /// The buffer without its register prefix.
    pub body: String,
    pub parsed: Option<ParsedCommand>,
    /// Count typed in the buffer. Zero counts are dropped.
    pub count: Option<u32>,
    pub register: Option<String>,
}

impl<'a> Resolved<'a> {
    /// Wraps a directly looked-up action that carries no count or operand.
    pub fn bare(action: &'a Action, token: &str) -> Self {
        Self {
            action,
            raw: token.to_string(),
            body: token.to_string(),
            parsed: None,
            count: None,
            register: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    Resolved(Resolved<'a>),
    /// Keep accumulating keys.
    Partial,
    /// Discard the buffer.
    Invalid,
}

enum RegisterPrefix<'b, B: ?Sized> {
    Incomplete,
    Invalid,
    Split(Option<&'b str>, &'b B),
}

fn is_register_name(name: char) -> bool {
    name.is_ascii_alphanumeric() || name == '"'
}

fn split_register(buffer: &str) -> RegisterPrefix<'_, str> {
    let Some(rest) = buffer.strip_prefix('"') else {
        return RegisterPrefix::Split(None, buffer);
    };
    let Some(name) = rest.chars().next() else {
        return RegisterPrefix::Incomplete;
    };
    if !is_register_name(name) {
        return RegisterPrefix::Invalid;
    }
    let (name, body) = rest.split_at(name.len_utf8());
    if body.is_empty() {
        RegisterPrefix::Incomplete
    } else {
        RegisterPrefix::Split(Some(name), body)
    }
}

/// Same as [`split_register`] over typed key tokens. The register name must
/// be a single plain character token.
fn split_register_keys<S: AsRef<str>>(keys: &[S]) -> RegisterPrefix<'_, [S]> {
    let Some((first, rest)) = keys.split_first() else {
        return RegisterPrefix::Split(None, keys);
    };
    if first.as_ref() != "\"" {
        return RegisterPrefix::Split(None, keys);
    }
    let Some((name, body)) = rest.split_first() else {
        return RegisterPrefix::Incomplete;
    };
    let name = name.as_ref();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_register_name(c) => {}
        _ => return RegisterPrefix::Invalid,
    }
    if body.is_empty() {
        RegisterPrefix::Incomplete
    } else {
        RegisterPrefix::Split(Some(name), body)
    }
}

/// The buffer without any register prefix. Incomplete or invalid prefixes
/// yield an empty body.
pub fn buffer_body(buffer: &str) -> &str {
    match split_register(buffer) {
        RegisterPrefix::Split(_, body) => body,
        RegisterPrefix::Incomplete | RegisterPrefix::Invalid => "",
    }
}

/// The action a parsed command is bound to.
///
/// Operators bound to a nested node (like `d`, waiting for `dd`) still take
/// a range operand: `3,7d` runs the doubled form `dd` over the range.
fn lookup<'a>(keymap: &'a KeyTrieNode, parsed: &ParsedCommand) -> Option<&'a Action> {
    match keymap.get(&parsed.operator)? {
        KeyTrie::Leaf(action) => Some(action),
        KeyTrie::Branch(node) if matches!(parsed.operand, Operand::Range(..)) => {
            node.action(&parsed.operator)
        }
        KeyTrie::Branch(_) => None,
    }
}

fn is_digit_key(key: &str) -> bool {
    key.len() == 1 && key.as_bytes()[0].is_ascii_digit()
}

/// Resolves a command buffer against a keymap.
///
/// The buffer is split back into key tokens first; see [`resolve_keys`]
/// when the tokens as typed are at hand.
pub fn resolve<'a>(buffer: &str, keymap: &'a KeyTrieNode) -> Resolution<'a> {
    resolve_keys(&tokenize(buffer), keymap)
}

/// Resolves the key tokens of a command buffer against a keymap.
pub fn resolve_keys<'a, S: AsRef<str>>(keys: &[S], keymap: &'a KeyTrieNode) -> Resolution<'a> {
    let (register, body_keys) = match split_register_keys(keys) {
        RegisterPrefix::Split(register, body) => (register, body),
        RegisterPrefix::Incomplete => return Resolution::Partial,
        RegisterPrefix::Invalid => return Resolution::Invalid,
    };
    let raw: String = keys.iter().map(AsRef::as_ref).collect();
    let body: String = body_keys.iter().map(AsRef::as_ref).collect();
    let resolved = |action: &'a Action, parsed: Option<ParsedCommand>, count: Option<u32>| {
        Resolution::Resolved(Resolved {
            action,
            raw: raw.clone(),
            body: body.clone(),
            parsed,
            count,
            register: register.map(str::to_string),
        })
    };

    if let Some(parsed) = parser::parse(&body)
        && let Some(action) = lookup(keymap, &parsed)
    {
        // Only a leading number is a count; the `5` of `d5g` is a target.
        let count = if body.starts_with(|c: char| c.is_ascii_digit()) {
            parsed.operand.numeric().filter(|&n| n > 0)
        } else {
            None
        };
        return resolved(action, Some(parsed), count);
    }

    if parser::is_partial(&body) {
        return Resolution::Partial;
    }

    let digits = body_keys
        .iter()
        .take_while(|key| is_digit_key(key.as_ref()))
        .count();
    let count = body[..digits].parse().ok().filter(|&n| n > 0);
    match keymap.traverse(&body_keys[digits..]) {
        TrieMatch::Leaf(action) => resolved(action, None, count),
        TrieMatch::Partial => Resolution::Partial,
        TrieMatch::NoMatch => Resolution::Invalid,
    }
}

/// Runs a resolved action and folds its result into the state.
///
/// The buffer and pending count are always cleared, the command stamp is
/// advanced, and repeatable changes are recorded for dot-repeat.
pub fn execute(
    state: &EngineState,
    resolved: &Resolved<'_>,
    settings: &Settings,
) -> (EngineState, Option<Command>) {
    let count = resolved.count.or(state.pending_count);
    let ctx = CommandContext {
        state,
        count,
        register: resolved.register.as_deref(),
        operand: resolved.parsed.as_ref().map(|parsed| &parsed.operand),
        settings,
    };

    let result = resolved.action.run(&ctx);
    tracing::debug!(
        action = resolved.action.name(),
        buffer = %resolved.raw,
        ?count,
        register = resolved.register.as_deref().unwrap_or(UNNAMED_REGISTER),
        "executed command"
    );

    let mut next = result.state.unwrap_or_else(|| state.clone());
    next.clear_buffer();
    next.pending_count = None;
    next.last_command = Some(resolved.raw.clone());
    next.last_command_tick = state.last_command_tick.wrapping_add(1);
    let next = repeat::record_change(&next, &resolved.body, count, resolved.register.as_deref());
    (next, result.command)
}
