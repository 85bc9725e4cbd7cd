//! Stack-command parser.
//!
//! Recognises the structured forms a command buffer can take (`5g`, `3d`,
//! `3,7d`, `d5g`, `@name`, ...) independently of any keymap. Forms are
//! tried in a fixed order and the first match wins:
//!
//! 1. `gg` - bottom of the stack
//! 2. `@name` - named reference
//! 3. `<digits>g` - absolute position
//! 4. `<digits><op>` - count for `d y x p + - * /`, position otherwise
//! 5. bare `G j k d y p x s r`
//! 6. `<start>,<end><letter>` - range
//! 7. `[dyx]<digits>g` - delete/yank/drop to position

use std::sync::LazyLock;

use regex::Regex;

/// Operators whose numeric prefix is a count rather than a position.
const COUNT_OPERATORS: &str = "dyxp+-*/";

static NAMED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(\w+)$").expect("static pattern"));
static POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)g$").expect("static pattern"));
static COUNTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([a-zA-Z+\-*/])$").expect("static pattern"));
static RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+),(\d+)([a-zA-Z])$").expect("static pattern"));
static COMPOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([dyx])(\d+)g$").expect("static pattern"));

static PARTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+|g|@|@\w+|\d+,|\d+,\d+|[dyx]\d*)$").expect("static pattern")
});

/// Fixed operand of a bare single-key command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    Top,
    Bottom,
    Swap,
    Rotate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Count(u32),
    Position(usize),
    Relative(i64),
    Range(usize, usize),
    Named(String),
    Special(Special),
}

impl Operand {
    /// The numeric value count- and position-type operands carry.
    pub fn numeric(&self) -> Option<u32> {
        match self {
            Operand::Count(n) => Some(*n),
            Operand::Position(p) => u32::try_from(*p).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The operator; also the keymap key the command is looked up under.
    pub operator: String,
    pub operand: Operand,
}

impl ParsedCommand {
    fn new(operator: impl Into<String>, operand: Operand) -> Self {
        Self {
            operator: operator.into(),
            operand,
        }
    }
}

type Matcher = fn(&str) -> Option<ParsedCommand>;

const MATCHERS: &[Matcher] = &[
    match_bottom,
    match_named,
    match_position,
    match_counted,
    match_bare,
    match_range,
    match_compound,
];

/// Parses a whole buffer into a structured stack command.
pub fn parse(buffer: &str) -> Option<ParsedCommand> {
    MATCHERS.iter().find_map(|matcher| matcher(buffer))
}

/// Whether `buffer` could still grow into a structured command.
pub fn is_partial(buffer: &str) -> bool {
    PARTIAL.is_match(buffer)
}

fn match_bottom(buffer: &str) -> Option<ParsedCommand> {
    (buffer == "gg").then(|| ParsedCommand::new("gg", Operand::Special(Special::Bottom)))
}

fn match_named(buffer: &str) -> Option<ParsedCommand> {
    let caps = NAMED.captures(buffer)?;
    Some(ParsedCommand::new("@", Operand::Named(caps[1].to_string())))
}

fn match_position(buffer: &str) -> Option<ParsedCommand> {
    let caps = POSITION.captures(buffer)?;
    let position = caps[1].parse().ok()?;
    Some(ParsedCommand::new("g", Operand::Position(position)))
}

fn match_counted(buffer: &str) -> Option<ParsedCommand> {
    let caps = COUNTED.captures(buffer)?;
    let operator = &caps[2];
    let operand = if COUNT_OPERATORS.contains(operator) {
        Operand::Count(caps[1].parse().ok()?)
    } else {
        Operand::Position(caps[1].parse().ok()?)
    };
    Some(ParsedCommand::new(operator, operand))
}

fn match_bare(buffer: &str) -> Option<ParsedCommand> {
    let operand = match buffer {
        "G" => Operand::Special(Special::Top),
        "j" => Operand::Relative(1),
        "k" => Operand::Relative(-1),
        "d" | "y" | "p" | "x" => Operand::Count(1),
        "s" => Operand::Special(Special::Swap),
        "r" => Operand::Special(Special::Rotate),
        _ => return None,
    };
    Some(ParsedCommand::new(buffer, operand))
}

fn match_range(buffer: &str) -> Option<ParsedCommand> {
    let caps = RANGE.captures(buffer)?;
    let start = caps[1].parse().ok()?;
    let end = caps[2].parse().ok()?;
    Some(ParsedCommand::new(&caps[3], Operand::Range(start, end)))
}

fn match_compound(buffer: &str) -> Option<ParsedCommand> {
    let caps = COMPOUND.captures(buffer)?;
    let position = caps[2].parse().ok()?;
    Some(ParsedCommand::new(
        format!("{}g", &caps[1]),
        Operand::Position(position),
    ))
}
