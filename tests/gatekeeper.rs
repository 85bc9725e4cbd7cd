use vim_stack::gate::should_handle;
use vim_stack::{EngineState, InteractionContext, KeyCode, KeyEvent, Mode, Modifiers};

fn ch(c: char) -> KeyEvent {
    KeyEvent::plain(KeyCode::Char(c))
}

fn esc() -> KeyEvent {
    KeyEvent::plain(KeyCode::Esc)
}

fn enter() -> KeyEvent {
    KeyEvent::plain(KeyCode::Enter)
}

fn in_mode(mode: Mode) -> EngineState {
    EngineState {
        mode,
        ..EngineState::new()
    }
}

fn with_buffer(buffer: &str) -> EngineState {
    EngineState {
        command_buffer: buffer.to_string(),
        ..EngineState::new()
    }
}

const NAV: InteractionContext = InteractionContext::StackNavigation;

#[test]
fn insert_mode_only_takes_escape() {
    let state = in_mode(Mode::Insert);
    assert!(should_handle(&esc(), NAV, &state));
    assert!(should_handle(&KeyEvent::new(KeyCode::Char('['), Modifiers::CTRL), NAV, &state));
    assert!(!should_handle(&ch('j'), NAV, &state));
    assert!(!should_handle(&enter(), NAV, &state));
}

#[test]
fn command_mode_takes_escape_and_submit() {
    let state = in_mode(Mode::Command);
    assert!(should_handle(&esc(), NAV, &state));
    assert!(should_handle(&enter(), NAV, &state));
    assert!(!should_handle(&ch('w'), NAV, &state));
}

#[test]
fn search_mode_takes_everything() {
    let state = in_mode(Mode::Search);
    for event in [ch('a'), ch('1'), ch(' '), enter(), KeyEvent::plain(KeyCode::Backspace)] {
        assert!(should_handle(&event, InteractionContext::ModalDialog, &state));
    }
}

#[test]
fn mode_rules_override_context() {
    assert!(!should_handle(&ch('j'), NAV, &in_mode(Mode::Insert)));
    assert!(should_handle(
        &ch('x'),
        InteractionContext::CellEditing,
        &in_mode(Mode::Search)
    ));
}

#[test]
fn cell_editing_takes_escape_and_modified_submit() {
    let state = EngineState::new();
    let ctx = InteractionContext::CellEditing;
    assert!(should_handle(&esc(), ctx, &state));
    assert!(!should_handle(&enter(), ctx, &state));
    assert!(should_handle(&KeyEvent::new(KeyCode::Enter, Modifiers::CTRL), ctx, &state));
    assert!(should_handle(&KeyEvent::new(KeyCode::Enter, Modifiers::SHIFT), ctx, &state));
    assert!(!should_handle(&ch('j'), ctx, &state));
}

#[test]
fn inputs_take_escape_and_submit() {
    let state = EngineState::new();
    for ctx in [InteractionContext::CommandInput, InteractionContext::SearchInput] {
        assert!(should_handle(&esc(), ctx, &state));
        assert!(should_handle(&enter(), ctx, &state));
        assert!(!should_handle(&ch('d'), ctx, &state));
    }
}

#[test]
fn widgets_take_escape_and_meta() {
    let state = EngineState::new();
    let ctx = InteractionContext::WidgetInteraction;
    assert!(should_handle(&esc(), ctx, &state));
    assert!(should_handle(&ch(':'), ctx, &state));
    assert!(should_handle(&KeyEvent::plain(KeyCode::F(5)), ctx, &state));
    assert!(!should_handle(&ch('j'), ctx, &state));
    assert!(!should_handle(&enter(), ctx, &state));
}

#[test]
fn modal_dialog_takes_only_escape() {
    let state = EngineState::new();
    let ctx = InteractionContext::ModalDialog;
    assert!(should_handle(&esc(), ctx, &state));
    assert!(!should_handle(&enter(), ctx, &state));
    assert!(!should_handle(&ch(':'), ctx, &state));
}

#[test]
fn stack_navigation_rejects_plain_text() {
    let state = EngineState::new();
    assert!(should_handle(&ch('j'), NAV, &state));
    assert!(should_handle(&ch('d'), NAV, &state));
    assert!(should_handle(&KeyEvent::plain(KeyCode::Down), NAV, &state));
    assert!(!should_handle(&ch(' '), NAV, &state));
    assert!(!should_handle(&ch('_'), NAV, &state));
}

#[test]
fn digits_pass_while_a_count_or_operand_is_open() {
    assert!(should_handle(&ch('3'), NAV, &with_buffer("")));
    assert!(should_handle(&ch('0'), NAV, &with_buffer("12")));
    assert!(should_handle(&ch('5'), NAV, &with_buffer("d")));
    assert!(should_handle(&ch('7'), NAV, &with_buffer("3,")));
    assert!(should_handle(&ch('2'), NAV, &with_buffer("\"a")));
    assert!(!should_handle(&ch('4'), NAV, &with_buffer("3d")));
    assert!(!should_handle(&ch('4'), NAV, &with_buffer("c")));
}
