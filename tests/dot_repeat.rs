use vim_stack::repeat::{execute_dot_repeat, record_change, should_record};
use vim_stack::{Command, Engine, EngineState, LastChange};

mod support;
use support::keys::{feed, semantic};

#[test]
fn change_grammar() {
    assert!(!should_record("j"));
    assert!(should_record("3dd"));
    assert!(!should_record("gg"));
    assert!(should_record("rs"));
}

#[test]
fn every_change_family_records() {
    for command in [
        "dd", "d5g", "x", "3x", "xx", "2xx", "x5g", "3,7d", "yy", "2Y", "y4g", "p", "3P", "o", "O", "cc", "C", "s",
        "S", "r", "4r",
    ] {
        assert!(should_record(command), "{command:?} should record");
    }
}

#[test]
fn navigation_and_mode_commands_never_record() {
    for command in ["k", "5g", "G", "v", "V", "i", ":", "/", "?", "n", "N", ".", "@a", "<Escape>"] {
        assert!(!should_record(command), "{command:?} should not record");
    }
}

#[test]
fn record_change_ignores_non_changes() {
    let state = EngineState::new();
    assert_eq!(record_change(&state, "j", Some(2), None), state);

    let recorded = record_change(&state, "3dd", Some(3), Some("a"));
    assert_eq!(
        recorded.last_change,
        Some(LastChange {
            command: "3dd".into(),
            count: Some(3),
            register: Some("a".into()),
        })
    );
}

#[test]
fn dot_repeat_needs_a_recorded_change() {
    let state = EngineState::new();
    assert_eq!(execute_dot_repeat(&state), None);

    let state = record_change(&state, "x", None, None);
    assert!(matches!(
        execute_dot_repeat(&state),
        Some(Command::DotRepeat { change }) if change.command == "x"
    ));
}

#[test]
fn engine_replays_last_change_after_navigation() {
    let mut engine = Engine::new();
    engine.set_stack_depth(10);

    assert!(semantic(&feed(&mut engine, ".")).is_empty());

    feed(&mut engine, "\"b3ddjk");
    let commands = semantic(&feed(&mut engine, "."));
    assert_eq!(
        commands,
        vec![Command::DotRepeat {
            change: LastChange {
                command: "3dd".into(),
                count: Some(3),
                register: Some("b".into()),
            }
        }]
    );
}
