//! Workspace commands typed on the `:` command line.
//!
//! | Input | Command |
//! |---|---|
//! | `:workspace <name>`, `:w <name>` | [`Command::SwitchWorkspace`] |
//! | `:workspaces`, `:ws` | [`Command::ListWorkspaces`] |
//! | `:new-workspace <name>`, `:nw <name>` | [`Command::CreateWorkspace`] |
//!
//! Anything else is left to the host.

use crate::types::Command;

/// Parses a submitted command line. Returns `None` for lines that are not
/// workspace commands, including ones missing a required name.
pub fn parse_workspace_command(line: &str) -> Option<Command> {
    let body = line.trim().strip_prefix(':')?.trim_start();
    let (verb, rest) = match body.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (body, ""),
    };

    match verb {
        "workspace" | "w" => named(rest).map(|name| Command::SwitchWorkspace { name }),
        "new-workspace" | "nw" => named(rest).map(|name| Command::CreateWorkspace { name }),
        "workspaces" | "ws" if rest.is_empty() => Some(Command::ListWorkspaces),
        _ => None,
    }
}

fn named(rest: &str) -> Option<String> {
    (!rest.is_empty()).then(|| rest.to_string())
}
