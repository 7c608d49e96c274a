//! GitHub Actions workflow command formatting
//!
//! Renders workflow commands like ::group::, ::error::, ::warning:: in the
//! exact wire format the runner parses from stdout.

use crate::types::WorkflowCommand;
use std::fmt;
use std::io::Write;

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name())?;

        let params = match self {
            WorkflowCommand::Error { params, .. }
            | WorkflowCommand::Warning { params, .. }
            | WorkflowCommand::Notice { params, .. } => params.pairs(),
            _ => Vec::new(),
        };
        if !params.is_empty() {
            let rendered = params
                .iter()
                .map(|(key, value)| format!("{}={}", key, escape_property(value)))
                .collect::<Vec<_>>()
                .join(",");
            write!(f, " {}", rendered)?;
        }

        let message = match self {
            WorkflowCommand::GroupStart { title } => title.as_str(),
            WorkflowCommand::GroupEnd => "",
            WorkflowCommand::Error { message, .. }
            | WorkflowCommand::Warning { message, .. }
            | WorkflowCommand::Notice { message, .. }
            | WorkflowCommand::Debug { message } => message.as_str(),
            WorkflowCommand::AddMask { value } => value.as_str(),
        };

        write!(f, "::{}", escape_data(message))
    }
}

/// Escape a command message
///
/// `%` must be escaped first so the other escapes are not double-encoded.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value
pub fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Write a workflow command to stdout where the runner picks it up
pub fn issue(command: &WorkflowCommand) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    // A closed stdout leaves nothing to report to
    let _ = writeln!(handle, "{}", command);
}
