//! Default command functions and the keymaps that bind them.
//!
//! Positions count up from the bottom of the stack: `gg` goes to position 1
//! and `G` to the top (the current depth).
//!
//! `d`, `y`, `c` and `x` wait for a second key in normal mode: doubled
//! (`dd`, `xx`) they act on the cursor item, and `d5g`/`x5g` act on the span
//! up to a position.

use crate::keymap::{CommandContext, CommandResult, KeyTrie, KeyTrieNode, Keymaps};
use crate::parser::Operand;
use crate::repeat;
use crate::search;
use crate::stack::{self, StackOutcome};
use crate::state::{EngineState, clamp_index, signed_position};
use crate::types::{Command, Mode, SearchDirection};

fn leaf(
    name: &'static str,
    run: fn(&CommandContext<'_>) -> CommandResult,
) -> KeyTrie {
    KeyTrie::leaf(name, run)
}

fn node(name: &str, entries: Vec<(&str, KeyTrie)>) -> KeyTrieNode {
    let mut node = KeyTrieNode::new(name);
    for (key, trie) in entries {
        node.insert(key, trie);
    }
    node
}

fn branch(name: &str, entries: Vec<(&str, KeyTrie)>) -> KeyTrie {
    KeyTrie::Branch(node(name, entries))
}

/// The keymaps an engine starts with unless the builder overrides them.
pub fn default_keymaps() -> Keymaps {
    let normal = node(
        "normal",
        vec![
            ("j", leaf("move_down", move_down)),
            ("<Down>", leaf("move_down", move_down)),
            ("k", leaf("move_up", move_up)),
            ("<Up>", leaf("move_up", move_up)),
            ("g", leaf("goto_position", goto_position)),
            ("gg", leaf("goto_bottom", goto_bottom)),
            ("G", leaf("goto_top", goto_top)),
            ("d", branch("delete", vec![("d", leaf("delete", delete))])),
            ("dg", leaf("delete_to_position", delete_to_position)),
            ("x", branch("drop", vec![("x", leaf("delete", delete))])),
            ("xg", leaf("delete_to_position", delete_to_position)),
            ("y", branch("yank", vec![("y", leaf("yank", yank))])),
            ("yg", leaf("yank_to_position", yank_to_position)),
            ("Y", leaf("yank", yank)),
            ("p", leaf("paste_after", paste_after)),
            ("P", leaf("paste_before", paste_before)),
            ("s", leaf("swap", swap)),
            ("r", leaf("rotate", rotate)),
            ("o", leaf("open_below", open_below)),
            ("O", leaf("open_above", open_above)),
            ("c", branch("change", vec![("c", leaf("change", change))])),
            ("S", leaf("change", change)),
            ("i", leaf("insert_mode", insert_mode)),
            ("a", leaf("insert_mode", insert_mode)),
            ("v", leaf("visual_mode", visual_mode)),
            ("V", leaf("visual_mode", visual_mode)),
            ("/", leaf("search_forward", search_forward)),
            ("?", leaf("search_backward", search_backward)),
            ("n", leaf("next_match", next_match)),
            ("N", leaf("prev_match", prev_match)),
            (":", leaf("command_mode", command_mode)),
            (".", leaf("dot_repeat", dot_repeat)),
            ("@", leaf("goto_named", goto_named)),
            ("<Escape>", leaf("escape", escape)),
        ],
    );

    let visual = node(
        "visual",
        vec![
            ("j", leaf("move_down", move_down)),
            ("<Down>", leaf("move_down", move_down)),
            ("k", leaf("move_up", move_up)),
            ("<Up>", leaf("move_up", move_up)),
            ("g", leaf("goto_position", goto_position)),
            ("gg", leaf("goto_bottom", goto_bottom)),
            ("G", leaf("goto_top", goto_top)),
            ("d", leaf("delete", delete)),
            ("x", leaf("delete", delete)),
            ("y", leaf("yank", yank)),
            ("Y", leaf("yank", yank)),
            ("c", leaf("change", change)),
            ("v", leaf("exit_visual", escape)),
            ("V", leaf("exit_visual", escape)),
            ("<Escape>", leaf("escape", escape)),
        ],
    );

    let insert = node("insert", vec![("<Escape>", leaf("escape", escape))]);

    let command = node(
        "command",
        vec![
            ("<Escape>", leaf("escape", escape)),
            ("<Enter>", leaf("submit", escape)),
        ],
    );

    Keymaps {
        normal,
        insert,
        visual,
        command,
    }
}

fn in_mode(state: &EngineState, mode: Mode) -> EngineState {
    let mut next = state.clone();
    next.mode = mode;
    next
}

/// Moves to `position`; visual mode extends the selection instead.
fn jump(state: &EngineState, position: i64) -> EngineState {
    match state.mode {
        Mode::Visual => stack::extend_to(state, position),
        _ => stack::move_to_position(state, position),
    }
}

fn relative(ctx: &CommandContext<'_>, offset: i64) -> CommandResult {
    let state = ctx.state;
    let next = stack::move_relative(state, offset);
    let offset = next.stack_position as i64 - state.stack_position as i64;
    CommandResult::emit(next, Command::MoveRelative { offset })
}

pub fn move_down(ctx: &CommandContext<'_>) -> CommandResult {
    relative(ctx, i64::from(ctx.count()))
}

pub fn move_up(ctx: &CommandContext<'_>) -> CommandResult {
    relative(ctx, -i64::from(ctx.count()))
}

pub fn goto_position(ctx: &CommandContext<'_>) -> CommandResult {
    let target = match ctx.operand {
        Some(Operand::Position(position)) => signed_position(*position),
        _ => i64::from(ctx.count()),
    };
    let next = jump(ctx.state, target);
    let position = next.stack_position;
    CommandResult::emit(next, Command::MoveToPosition { position })
}

pub fn goto_bottom(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult::emit(jump(ctx.state, 1), Command::MoveToBottom)
}

/// `G` goes to the top; with a count it goes to that position instead.
pub fn goto_top(ctx: &CommandContext<'_>) -> CommandResult {
    match ctx.count {
        Some(_) => goto_position(ctx),
        None => {
            let depth = signed_position(ctx.state.stack_depth);
            CommandResult::emit(jump(ctx.state, depth), Command::MoveToTop)
        }
    }
}

pub fn goto_named(ctx: &CommandContext<'_>) -> CommandResult {
    match ctx.operand {
        Some(Operand::Named(name)) => CommandResult {
            state: None,
            command: Some(Command::MoveToNamed { name: name.clone() }),
        },
        _ => CommandResult::none(),
    }
}

fn register_of(outcome: &StackOutcome) -> String {
    outcome
        .effect
        .as_ref()
        .and_then(|effect| effect.register.clone())
        .unwrap_or_else(|| outcome.state.register_or_default().to_string())
}

/// Emits `command` only when the operation touched something.
fn finish(outcome: StackOutcome, command: impl FnOnce(Vec<usize>, String) -> Command) -> CommandResult {
    if outcome.affected.is_empty() {
        return CommandResult::with_state(outcome.state);
    }
    let register = register_of(&outcome);
    CommandResult::emit(outcome.state, command(outcome.affected, register))
}

/// Deletes `count` items, the selection, or a `start,end` range. Always
/// lands in normal mode.
pub fn delete(ctx: &CommandContext<'_>) -> CommandResult {
    let mut outcome = match ctx.operand {
        Some(Operand::Range(start, end)) => stack::delete_range(ctx.state, *start, *end, ctx.register),
        _ => stack::delete_items(ctx.state, ctx.count(), ctx.register),
    };
    outcome.state.mode = Mode::Normal;
    finish(outcome, |positions, to_register| Command::DeleteItems {
        positions,
        to_register,
    })
}

pub fn yank(ctx: &CommandContext<'_>) -> CommandResult {
    let mut outcome = match ctx.operand {
        Some(Operand::Range(start, end)) => stack::yank_range(ctx.state, *start, *end, ctx.register),
        _ => stack::yank_items(ctx.state, ctx.count(), ctx.register),
    };
    outcome.state.mode = Mode::Normal;
    finish(outcome, |positions, to_register| Command::YankItems {
        positions,
        to_register,
    })
}

fn target(ctx: &CommandContext<'_>) -> Option<usize> {
    match ctx.operand {
        Some(Operand::Position(position)) => Some(*position),
        _ => None,
    }
}

pub fn delete_to_position(ctx: &CommandContext<'_>) -> CommandResult {
    let Some(target) = target(ctx) else {
        return CommandResult::none();
    };
    let outcome = stack::delete_to_position(ctx.state, target, ctx.register);
    finish(outcome, |positions, to_register| Command::DeleteToPosition {
        positions,
        target: clamp_index(target, ctx.state.stack_depth),
        to_register,
    })
}

pub fn yank_to_position(ctx: &CommandContext<'_>) -> CommandResult {
    let Some(target) = target(ctx) else {
        return CommandResult::none();
    };
    let outcome = stack::yank_to_position(ctx.state, target, ctx.register);
    finish(outcome, |positions, to_register| Command::YankToPosition {
        positions,
        target: clamp_index(target, ctx.state.stack_depth),
        to_register,
    })
}

fn paste(ctx: &CommandContext<'_>, after: bool) -> CommandResult {
    let outcome = stack::paste_items(ctx.state, ctx.register, after);
    let from_register = register_of(&outcome);
    let position = outcome.affected.first().copied().unwrap_or(ctx.state.stack_position);
    CommandResult::emit(
        outcome.state,
        Command::PasteItems {
            from_register,
            position,
            count: ctx.count(),
        },
    )
}

pub fn paste_after(ctx: &CommandContext<'_>) -> CommandResult {
    paste(ctx, true)
}

pub fn paste_before(ctx: &CommandContext<'_>) -> CommandResult {
    paste(ctx, false)
}

/// Too few items is a silent no-op.
pub fn swap(ctx: &CommandContext<'_>) -> CommandResult {
    let outcome = stack::swap_items(ctx.state);
    finish(outcome, |positions, _| Command::SwapItems { positions })
}

/// Rotates the typed count of items, or the configured default.
pub fn rotate(ctx: &CommandContext<'_>) -> CommandResult {
    let count = ctx.count.unwrap_or(ctx.settings.rotate_count);
    let outcome = stack::rotate_items(ctx.state, count);
    finish(outcome, |positions, _| Command::RotateItems { positions })
}

fn open(ctx: &CommandContext<'_>, above: bool) -> CommandResult {
    let mut next = in_mode(ctx.state, Mode::Insert);
    next.visual_selection = None;
    CommandResult::emit(
        next,
        Command::OpenItem {
            position: ctx.state.stack_position,
            above,
        },
    )
}

pub fn open_below(ctx: &CommandContext<'_>) -> CommandResult {
    open(ctx, false)
}

pub fn open_above(ctx: &CommandContext<'_>) -> CommandResult {
    open(ctx, true)
}

/// Replaces items (selection-aware) and starts editing them.
pub fn change(ctx: &CommandContext<'_>) -> CommandResult {
    let mut outcome = stack::yank_items(ctx.state, ctx.count(), ctx.register);
    outcome.state.mode = Mode::Insert;
    finish(outcome, |positions, to_register| Command::ChangeItems {
        positions,
        to_register,
    })
}

pub fn insert_mode(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult::with_state(in_mode(ctx.state, Mode::Insert))
}

pub fn visual_mode(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult::with_state(stack::enter_visual(ctx.state))
}

pub fn command_mode(ctx: &CommandContext<'_>) -> CommandResult {
    let mut next = in_mode(ctx.state, Mode::Command);
    next.visual_selection = None;
    CommandResult::with_state(next)
}

pub fn search_forward(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult::with_state(search::start_search(ctx.state, SearchDirection::Forward))
}

pub fn search_backward(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult::with_state(search::start_search(ctx.state, SearchDirection::Backward))
}

pub fn next_match(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult {
        state: None,
        command: search::navigate_match(ctx.state, false),
    }
}

pub fn prev_match(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult {
        state: None,
        command: search::navigate_match(ctx.state, true),
    }
}

pub fn dot_repeat(ctx: &CommandContext<'_>) -> CommandResult {
    CommandResult {
        state: None,
        command: repeat::execute_dot_repeat(ctx.state),
    }
}

/// Drops transient state and returns to normal mode.
pub fn escape(ctx: &CommandContext<'_>) -> CommandResult {
    let mut next = in_mode(ctx.state, Mode::Normal);
    next.clear_buffer();
    next.pending_count = None;
    next.visual_selection = None;
    CommandResult::with_state(next)
}
