use vim_stack::parser::{Operand, ParsedCommand};
use vim_stack::stack::{self, OperationKind};
use vim_stack::state::{clamp_index, signed_position};
use vim_stack::{EngineState, Mode, ValidationError, VisualSelection};

fn at(position: usize, depth: usize) -> EngineState {
    let mut state = EngineState::new().with_depth(depth);
    state.stack_position = position;
    state
}

#[test]
fn delete_three_from_the_middle() {
    let outcome = stack::delete_items(&at(5, 10), 3, None);
    assert_eq!(outcome.affected, vec![5, 6, 7]);
    assert_eq!(outcome.state.stack_depth, 7);
    assert_eq!(outcome.state.stack_position, 5);
    assert_eq!(outcome.state.active_register.as_deref(), Some("\""));
    let effect = outcome.effect.expect("delete has an effect");
    assert_eq!(effect.kind, OperationKind::Delete);
}

#[test]
fn delete_past_the_top_clamps_position() {
    let outcome = stack::delete_items(&at(8, 10), 5, None);
    assert_eq!(outcome.affected, vec![8, 9, 10]);
    assert_eq!(outcome.state.stack_depth, 5);
    assert_eq!(outcome.state.stack_position, 5);
}

#[test]
fn delete_everything_keeps_cursor_at_one() {
    let outcome = stack::delete_items(&at(1, 2), 2, Some("a"));
    assert_eq!(outcome.state.stack_depth, 0);
    assert_eq!(outcome.state.stack_position, 1);
    assert_eq!(outcome.state.active_register.as_deref(), Some("a"));
}

#[test]
fn selection_wins_over_count() {
    let mut state = at(6, 10);
    state.mode = Mode::Visual;
    state.visual_selection = Some(VisualSelection { start: 6, end: 3 });

    assert_eq!(stack::affected_positions(&state, 9), vec![3, 4, 5, 6]);
    let outcome = stack::delete_items(&state, 9, None);
    assert_eq!(outcome.affected, vec![3, 4, 5, 6]);
    assert_eq!(outcome.state.stack_depth, 6);
    assert_eq!(outcome.state.visual_selection, None);
}

#[test]
fn yank_keeps_depth_and_position() {
    let outcome = stack::yank_items(&at(2, 4), 2, Some("b"));
    assert_eq!(outcome.affected, vec![2, 3]);
    assert_eq!(outcome.state.stack_depth, 4);
    assert_eq!(outcome.state.stack_position, 2);
    let effect = outcome.effect.expect("yank has an effect");
    assert_eq!(effect.kind, OperationKind::Copy);
    assert_eq!(effect.register.as_deref(), Some("b"));
}

#[test]
fn paste_targets() {
    let after = stack::paste_items(&at(4, 6), None, true);
    assert_eq!(after.affected, vec![4]);
    assert_eq!(after.effect.map(|e| e.kind), Some(OperationKind::Move));

    let before = stack::paste_items(&at(4, 6), Some("z"), false);
    assert_eq!(before.affected, vec![5]);
    assert_eq!(before.state.active_register.as_deref(), Some("z"));
}

#[test]
fn swap_at_top_pairs_with_item_below() {
    assert_eq!(stack::swap_items(&at(10, 10)).affected, vec![10, 9]);
    assert_eq!(stack::swap_items(&at(3, 10)).affected, vec![3, 4]);
}

// Too few items is a silent no-op: no positions and no effect.
#[test]
fn swap_with_one_item_is_a_no_op() {
    let outcome = stack::swap_items(&at(1, 1));
    assert!(outcome.affected.is_empty());
    assert!(outcome.effect.is_none());
}

#[test]
fn rotate_clips_to_depth() {
    assert_eq!(stack::rotate_items(&at(2, 10), 3).affected, vec![2, 3, 4]);
    assert_eq!(stack::rotate_items(&at(9, 10), 3).affected, vec![9, 10]);
}

#[test]
fn rotate_with_one_item_in_reach_is_a_no_op() {
    let outcome = stack::rotate_items(&at(10, 10), 3);
    assert!(outcome.affected.is_empty());
    assert!(outcome.effect.is_none());
}

#[test]
fn delete_to_position_covers_the_span_either_way() {
    let up = stack::delete_to_position(&at(3, 10), 7, None);
    assert_eq!(up.affected, vec![3, 4, 5, 6, 7]);
    assert_eq!(up.state.stack_depth, 5);
    assert_eq!(up.state.stack_position, 3);

    let down = stack::yank_to_position(&at(4, 10), 1, None);
    assert_eq!(down.affected, vec![1, 2, 3, 4]);
    assert_eq!(down.state.stack_depth, 10);
}

#[test]
fn move_to_position_clamps_and_clears_selection() {
    let mut state = at(2, 5);
    state.visual_selection = Some(VisualSelection::at(2));

    let next = stack::move_to_position(&state, 99);
    assert_eq!(next.stack_position, 5);
    assert_eq!(next.visual_selection, None);
    assert_eq!(stack::move_to_position(&state, -3).stack_position, 1);
}

#[test]
fn move_relative_extends_selection_in_visual() {
    let state = stack::enter_visual(&at(4, 10));
    assert_eq!(state.visual_selection, Some(VisualSelection::at(4)));

    let next = stack::move_relative(&state, 2);
    assert_eq!(next.stack_position, 6);
    assert_eq!(next.visual_selection, Some(VisualSelection { start: 4, end: 6 }));

    let back = stack::move_relative(&next, -5);
    assert_eq!(back.visual_selection, Some(VisualSelection { start: 4, end: 1 }));

    let exited = stack::exit_visual(&back);
    assert_eq!(exited.mode, Mode::Normal);
    assert_eq!(exited.visual_selection, None);
}

#[test]
fn move_relative_outside_visual_drops_selection() {
    let mut state = at(4, 10);
    state.visual_selection = Some(VisualSelection::at(4));
    assert_eq!(stack::move_relative(&state, 1).visual_selection, None);
}

#[test]
fn selection_range_normalises() {
    let selection = VisualSelection { start: 7, end: 2 };
    assert_eq!(stack::selection_range(Some(&selection)), Some((2, 7)));
    assert_eq!(stack::selection_range(None), None);
}

#[test]
fn validation_reports_out_of_range_and_underflow() {
    let state = at(1, 5);
    let command = |operator: &str, operand| ParsedCommand {
        operator: operator.to_string(),
        operand,
    };

    assert_eq!(
        stack::validate(&state, &command("g", Operand::Position(6))),
        Err(ValidationError::OutOfRange {
            position: 6,
            depth: 5
        })
    );
    assert_eq!(
        stack::validate(&state, &command("d", Operand::Range(0, 3))),
        Err(ValidationError::OutOfRange {
            position: 0,
            depth: 5
        })
    );
    assert_eq!(
        stack::validate(&state, &command("+", Operand::Count(6))),
        Err(ValidationError::Underflow {
            requested: 6,
            available: 5
        })
    );
    assert!(stack::validate(&state, &command("g", Operand::Position(5))).is_ok());
    assert!(stack::validate(&state, &command("d", Operand::Count(5))).is_ok());
}

#[test]
fn counts_past_the_depth_are_clipped() {
    let outcome = stack::delete_items(&at(3, 10), u32::MAX, None);
    assert_eq!(outcome.affected, (3..=10).collect::<Vec<_>>());
    assert_eq!(outcome.state.stack_depth, 0);
    assert_eq!(outcome.state.stack_position, 1);

    assert_eq!(stack::rotate_items(&at(8, 10), u32::MAX).affected, vec![8, 9, 10]);
    assert!(stack::affected_positions(&at(1, 0), u32::MAX).is_empty());
    assert!(stack::rotate_items(&at(1, 10), 0).affected.is_empty());
}

#[test]
fn positions_past_i64_max_clamp_to_the_top() {
    let outcome = stack::delete_to_position(&at(3, 10), usize::MAX, None);
    assert_eq!(outcome.affected, (3..=10).collect::<Vec<_>>());
    assert_eq!(clamp_index(usize::MAX, 10), 10);
    assert_eq!(signed_position(usize::MAX), i64::MAX);
    assert_eq!(stack::move_to_position(&at(3, 10), i64::MAX).stack_position, 10);
    assert_eq!(stack::move_relative(&at(3, 10), i64::MAX).stack_position, 10);
}

#[test]
fn depth_sync_clamps_position_and_selection() {
    let mut state = at(8, 10);
    state.visual_selection = Some(VisualSelection { start: 3, end: 8 });
    let shrunk = state.with_depth(4);
    assert_eq!(shrunk.stack_position, 4);
    assert_eq!(shrunk.visual_selection, Some(VisualSelection { start: 3, end: 4 }));
}
