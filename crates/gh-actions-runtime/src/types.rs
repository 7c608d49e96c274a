//! Type definitions for GitHub Actions workflow commands

/// GitHub Actions workflow command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Start of a collapsible group: ::group::{title}
    GroupStart {
        /// Group title/name
        title: String,
    },

    /// End of a group: ::endgroup::
    GroupEnd,

    /// Error annotation: ::error title={t}::{message}
    Error {
        /// Error message
        message: String,
        /// Optional parameters
        params: CommandParams,
    },

    /// Warning annotation: ::warning::{message}
    Warning {
        /// Warning message
        message: String,
        /// Optional parameters
        params: CommandParams,
    },

    /// Debug message: ::debug::{message}
    Debug {
        /// Debug message
        message: String,
    },

    /// Notice annotation: ::notice::{message}
    Notice {
        /// Notice message
        message: String,
        /// Optional parameters
        params: CommandParams,
    },

    /// Mask a value in all later log output: ::add-mask::{value}
    AddMask {
        /// Secret to mask
        value: String,
    },
}

/// Optional parameters for annotation commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParams {
    /// Annotation title (title=)
    pub title: Option<String>,
}

impl CommandParams {
    /// Parameters carrying only an annotation title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    /// `key=value` pairs, skipping unset ones
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        self.title
            .iter()
            .map(|title| ("title", title.clone()))
            .collect()
    }
}

impl WorkflowCommand {
    /// Error annotation without parameters
    pub fn error(message: impl Into<String>) -> Self {
        WorkflowCommand::Error {
            message: message.into(),
            params: CommandParams::default(),
        }
    }

    /// Warning annotation without parameters
    pub fn warning(message: impl Into<String>) -> Self {
        WorkflowCommand::Warning {
            message: message.into(),
            params: CommandParams::default(),
        }
    }

    /// Notice annotation without parameters
    pub fn notice(message: impl Into<String>) -> Self {
        WorkflowCommand::Notice {
            message: message.into(),
            params: CommandParams::default(),
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        WorkflowCommand::Debug {
            message: message.into(),
        }
    }

    /// Name used between the leading `::` and the parameters
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowCommand::GroupStart { .. } => "group",
            WorkflowCommand::GroupEnd => "endgroup",
            WorkflowCommand::Error { .. } => "error",
            WorkflowCommand::Warning { .. } => "warning",
            WorkflowCommand::Debug { .. } => "debug",
            WorkflowCommand::Notice { .. } => "notice",
            WorkflowCommand::AddMask { .. } => "add-mask",
        }
    }
}
