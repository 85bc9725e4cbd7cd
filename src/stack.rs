//! Stack arithmetic.
//!
//! Pure transformations over [`EngineState`]. Nothing here touches stack
//! items: operations report which positions are affected and what the host
//! should do with them, and return the state the engine should believe
//! afterwards.

use crate::error::ValidationError;
use crate::parser::{Operand, ParsedCommand};
use crate::state::{EngineState, UNNAMED_REGISTER, clamp_index, clamp_position};
use crate::types::{Mode, VisualSelection};

/// The data movement the host performs for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Delete,
    Copy,
    Move,
    Swap,
    Rotate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideEffect {
    pub kind: OperationKind,
    pub register: Option<String>,
}

/// Result of a stack operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutcome {
    pub state: EngineState,
    /// 1-based positions the operation touches, in operation order.
    pub affected: Vec<usize>,
    pub effect: Option<SideEffect>,
}

impl StackOutcome {
    fn new(state: EngineState, affected: Vec<usize>, effect: Option<SideEffect>) -> Self {
        Self {
            state,
            affected,
            effect,
        }
    }
}

pub fn move_to_position(state: &EngineState, position: i64) -> EngineState {
    let mut next = state.clone();
    next.stack_position = clamp_position(position, state.stack_depth);
    next.visual_selection = None;
    next
}

/// Moves by `offset`. In visual mode the selection end follows the cursor;
/// elsewhere any selection is dropped.
pub fn move_relative(state: &EngineState, offset: i64) -> EngineState {
    let mut next = state.clone();
    let target = clamp_position(
        (state.stack_position as i64).saturating_add(offset),
        state.stack_depth,
    );
    next.stack_position = target;
    next.visual_selection = match state.mode {
        Mode::Visual => Some(VisualSelection {
            start: state
                .visual_selection
                .map_or(state.stack_position, |sel| sel.start),
            end: target,
        }),
        _ => None,
    };
    next
}

/// Moves to `position`, extending the selection when in visual mode.
pub fn extend_to(state: &EngineState, position: i64) -> EngineState {
    move_relative(state, position.saturating_sub(state.stack_position as i64))
}

pub fn enter_visual(state: &EngineState) -> EngineState {
    let mut next = state.clone();
    next.mode = Mode::Visual;
    next.visual_selection = Some(VisualSelection::at(state.stack_position));
    next
}

pub fn exit_visual(state: &EngineState) -> EngineState {
    let mut next = state.clone();
    next.mode = Mode::Normal;
    next.visual_selection = None;
    next
}

/// Normalises a selection into `(min, max)`.
pub fn selection_range(selection: Option<&VisualSelection>) -> Option<(usize, usize)> {
    selection.map(VisualSelection::ordered)
}

/// Positions an operation of `count` items touches.
///
/// An active selection wins over the count and yields its full range.
/// Otherwise the run starts at the cursor and stops at the stack depth.
pub fn affected_positions(state: &EngineState, count: u32) -> Vec<usize> {
    if let Some((low, high)) = selection_range(state.visual_selection.as_ref()) {
        return (low..=high).collect();
    }
    run_from(state.stack_position, count.max(1), state.stack_depth)
}

/// `count` positions upward from `start`, cut off at `depth`.
fn run_from(start: usize, count: u32, depth: usize) -> Vec<usize> {
    let Some(last) = (count as usize).checked_sub(1) else {
        return Vec::new();
    };
    let end = start.saturating_add(last).min(depth);
    (start..=end).collect()
}

fn removal_size(state: &EngineState, count: u32) -> usize {
    state
        .visual_selection
        .map_or(count.max(1) as usize, |sel| sel.span())
}

fn target_register(register: Option<&str>) -> String {
    register.unwrap_or(UNNAMED_REGISTER).to_string()
}

fn after_removal(state: &EngineState, removed: usize, register: &str) -> EngineState {
    let mut next = state.clone();
    next.stack_depth = state.stack_depth.saturating_sub(removed);
    next.stack_position = state.stack_position.min(next.stack_depth).max(1);
    next.visual_selection = None;
    next.active_register = Some(register.to_string());
    next
}

pub fn delete_items(state: &EngineState, count: u32, register: Option<&str>) -> StackOutcome {
    let register = target_register(register);
    let affected = affected_positions(state, count);
    let next = after_removal(state, removal_size(state, count), &register);
    StackOutcome::new(
        next,
        affected,
        Some(SideEffect {
            kind: OperationKind::Delete,
            register: Some(register),
        }),
    )
}

pub fn yank_items(state: &EngineState, count: u32, register: Option<&str>) -> StackOutcome {
    let register = target_register(register);
    let affected = affected_positions(state, count);
    let mut next = state.clone();
    next.visual_selection = None;
    next.active_register = Some(register.clone());
    StackOutcome::new(
        next,
        affected,
        Some(SideEffect {
            kind: OperationKind::Copy,
            register: Some(register),
        }),
    )
}

/// Pastes from `register`. The final depth and position are unknown until
/// the host reports them through a depth update.
pub fn paste_items(state: &EngineState, register: Option<&str>, after: bool) -> StackOutcome {
    let register = target_register(register);
    let target = state.stack_position + if after { 0 } else { 1 };
    let mut next = state.clone();
    next.visual_selection = None;
    next.active_register = Some(register.clone());
    StackOutcome::new(
        next,
        vec![target],
        Some(SideEffect {
            kind: OperationKind::Move,
            register: Some(register),
        }),
    )
}

/// Swaps the cursor item with its neighbour above, or below when the
/// cursor is at the top. Fewer than two items yields no positions.
pub fn swap_items(state: &EngineState) -> StackOutcome {
    let (position, depth) = (state.stack_position, state.stack_depth);
    let affected = if depth < 2 {
        Vec::new()
    } else if position >= depth {
        vec![depth, depth - 1]
    } else {
        vec![position, position + 1]
    };
    let effect = (!affected.is_empty()).then_some(SideEffect {
        kind: OperationKind::Swap,
        register: None,
    });
    StackOutcome::new(state.clone(), affected, effect)
}

/// Rotates `count` items starting at the cursor. Fewer than two items in
/// reach yields no positions.
pub fn rotate_items(state: &EngineState, count: u32) -> StackOutcome {
    let mut affected = run_from(state.stack_position, count, state.stack_depth);
    if affected.len() < 2 {
        affected.clear();
    }
    let effect = (!affected.is_empty()).then_some(SideEffect {
        kind: OperationKind::Rotate,
        register: None,
    });
    StackOutcome::new(state.clone(), affected, effect)
}

/// Inclusive span between `from` and `to`, both clamped into the stack.
fn range_positions(state: &EngineState, from: usize, to: usize) -> Vec<usize> {
    if state.stack_depth == 0 {
        return Vec::new();
    }
    let from = clamp_index(from, state.stack_depth);
    let to = clamp_index(to, state.stack_depth);
    (from.min(to)..=from.max(to)).collect()
}

/// Deletes the inclusive range `start..=end` (in either order).
pub fn delete_range(
    state: &EngineState,
    start: usize,
    end: usize,
    register: Option<&str>,
) -> StackOutcome {
    let register = target_register(register);
    let affected = range_positions(state, start, end);
    let next = after_removal(state, affected.len(), &register);
    StackOutcome::new(
        next,
        affected,
        Some(SideEffect {
            kind: OperationKind::Delete,
            register: Some(register),
        }),
    )
}

pub fn yank_range(
    state: &EngineState,
    start: usize,
    end: usize,
    register: Option<&str>,
) -> StackOutcome {
    let register = target_register(register);
    let affected = range_positions(state, start, end);
    let mut next = state.clone();
    next.visual_selection = None;
    next.active_register = Some(register.clone());
    StackOutcome::new(
        next,
        affected,
        Some(SideEffect {
            kind: OperationKind::Copy,
            register: Some(register),
        }),
    )
}

pub fn delete_to_position(
    state: &EngineState,
    target: usize,
    register: Option<&str>,
) -> StackOutcome {
    delete_range(state, state.stack_position, target, register)
}

pub fn yank_to_position(state: &EngineState, target: usize, register: Option<&str>) -> StackOutcome {
    yank_range(state, state.stack_position, target, register)
}

fn check_position(position: usize, depth: usize) -> Result<(), ValidationError> {
    if (1..=depth).contains(&position) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { position, depth })
    }
}

/// Checks a parsed command against the current stack bounds.
///
/// Advisory only: callers that want to pre-check a command use this before
/// dispatching. Position targets must lie in `[1, depth]`; counts may not
/// exceed the depth.
pub fn validate(state: &EngineState, parsed: &ParsedCommand) -> Result<(), ValidationError> {
    let depth = state.stack_depth;
    match &parsed.operand {
        Operand::Position(position) => check_position(*position, depth),
        Operand::Range(start, end) => {
            check_position(*start, depth)?;
            check_position(*end, depth)
        }
        Operand::Count(count) if *count as usize > depth => Err(ValidationError::Underflow {
            requested: *count as usize,
            available: depth,
        }),
        _ => Ok(()),
    }
}
