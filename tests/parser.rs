use vim_stack::parser::{Operand, ParsedCommand, Special, is_partial, parse};

fn parsed(operator: &str, operand: Operand) -> Option<ParsedCommand> {
    Some(ParsedCommand {
        operator: operator.to_string(),
        operand,
    })
}

#[test]
fn position_command() {
    assert_eq!(parse("5g"), parsed("g", Operand::Position(5)));
}

#[test]
fn range_command() {
    assert_eq!(parse("3,7d"), parsed("d", Operand::Range(3, 7)));
    assert_eq!(parse("7,3y"), parsed("y", Operand::Range(7, 3)));
}

#[test]
fn compound_to_position() {
    assert_eq!(parse("d5g"), parsed("dg", Operand::Position(5)));
    assert_eq!(parse("y12g"), parsed("yg", Operand::Position(12)));
    assert_eq!(parse("x2g"), parsed("xg", Operand::Position(2)));
}

#[test]
fn rejects_empty_and_unknown() {
    assert_eq!(parse(""), None);
    assert_eq!(parse("xyz"), None);
    assert_eq!(parse("dd"), None);
    assert_eq!(parse("3,d"), None);
}

#[test]
fn gg_beats_every_other_form() {
    assert_eq!(parse("gg"), parsed("gg", Operand::Special(Special::Bottom)));
}

#[test]
fn named_reference() {
    assert_eq!(parse("@inbox"), parsed("@", Operand::Named("inbox".into())));
    assert_eq!(parse("@"), None);
}

#[test]
fn count_operators_take_counts() {
    for op in ["d", "y", "x", "p", "+", "-", "*", "/"] {
        assert_eq!(
            parse(&format!("3{op}")),
            parsed(op, Operand::Count(3)),
            "operator {op}"
        );
    }
}

#[test]
fn other_letters_take_positions() {
    assert_eq!(parse("4j"), parsed("j", Operand::Position(4)));
    assert_eq!(parse("9G"), parsed("G", Operand::Position(9)));
}

#[test]
fn bare_commands_carry_implicit_operands() {
    assert_eq!(parse("G"), parsed("G", Operand::Special(Special::Top)));
    assert_eq!(parse("j"), parsed("j", Operand::Relative(1)));
    assert_eq!(parse("k"), parsed("k", Operand::Relative(-1)));
    assert_eq!(parse("p"), parsed("p", Operand::Count(1)));
    assert_eq!(parse("s"), parsed("s", Operand::Special(Special::Swap)));
    assert_eq!(parse("r"), parsed("r", Operand::Special(Special::Rotate)));
}

#[test]
fn partial_buffers() {
    for buffer in ["3", "42", "g", "@", "@wor", "3,", "3,7", "d", "y", "x", "d5"] {
        assert!(is_partial(buffer), "{buffer:?} should be partial");
    }
    for buffer in ["", "dd", "q", "3,7d", "gg", "3j"] {
        assert!(!is_partial(buffer), "{buffer:?} should not be partial");
    }
}

#[test]
fn numeric_operand_values() {
    assert_eq!(Operand::Count(3).numeric(), Some(3));
    assert_eq!(Operand::Position(8).numeric(), Some(8));
    assert_eq!(Operand::Range(1, 2).numeric(), None);
    assert_eq!(Operand::Relative(1).numeric(), None);
}
