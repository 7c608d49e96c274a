use crate::planner::BridgeState;
use crate::stub::StubStep;
use gh_issue_router_config::ConfigError;
use thiserror::Error;

/// The event does not carry what an issue transfer needs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("This action is not used in an issue based event")]
    NotAnIssueEvent,

    #[error("The event repository is not set")]
    RepositoryNotSet,
}

/// A failed step of the bridged transfer
///
/// Completed steps are not rolled back; `reached` tells how far the
/// protocol got and `bridge` names the repository that may be left behind.
#[derive(Error, Debug)]
#[error("Bridged transfer failed after reaching state {reached}")]
pub struct BridgeError {
    pub reached: BridgeState,
    pub bridge: Option<String>,
    #[source]
    pub source: anyhow::Error,
}

/// A failed step of the stub lifecycle
#[derive(Error, Debug)]
#[error("Stub issue step '{step}' failed")]
pub struct StubError {
    /// Number of the stub when creation had already succeeded
    pub stub_number: Option<u64>,
    pub step: StubStep,
    #[source]
    pub source: anyhow::Error,
}

/// Anything that fails a run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid configuration")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("Destination repository '{repo}' is not accessible")]
    Destination {
        repo: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to transfer issue to '{repo}'")]
    Transfer {
        repo: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Stub(#[from] StubError),

    #[error("Failed to apply labels to '{repo}'")]
    Labels {
        repo: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RunError {
    /// HTTP status of the failing remote call, when there was one
    pub fn status_code(&self) -> Option<u16> {
        let source = match self {
            RunError::Destination { source, .. }
            | RunError::Transfer { source, .. }
            | RunError::Labels { source, .. } => source,
            RunError::Bridge(err) => &err.source,
            RunError::Stub(err) => &err.source,
            RunError::Config(_) | RunError::Context(_) => return None,
        };
        gh_client::status_code(source)
    }
}
