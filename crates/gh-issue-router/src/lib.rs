//! Label-routed issue transfer
//!
//! When a label is added to an issue, the configured router decides which
//! repository the issue belongs in and the issue is transferred there.
//! Private → public moves go through a temporary bridge repository, a stub
//! issue can be left behind in the source repository, and labels can be
//! applied to the issue at its new location.
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_issue_router::{Orchestrator, RunOutcome, SourceContext};
//! use gh_issue_router_config::ActionConfig;
//! use gh_actions_runtime::{ActionsContext, EnvInputs};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ActionConfig::from_inputs(&EnvInputs)?;
//! let client = gh_client::connect(std::env::var("GITHUB_TOKEN")?, None)?;
//! let context = SourceContext::from_event(&ActionsContext::from_env().event()?)?;
//!
//! match Orchestrator::new(&client, &config).run(&context).await {
//!     Ok(RunOutcome::Transferred { outputs, .. }) => println!("{:?}", outputs),
//!     Ok(RunOutcome::NotRouted { .. }) => println!("nothing to do"),
//!     Err(failure) => eprintln!("{:#}", anyhow::Error::from(failure.error)),
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod labels;
pub mod logger;
pub mod orchestrator;
pub mod planner;
pub mod router;
pub mod stub;
pub mod transfer;

#[cfg(test)]
mod test_support;

pub use context::{SourceContext, SourceIssue, SourceRepository, TriggerLabel};
pub use error::{BridgeError, ContextError, RunError, StubError};
pub use labels::{LabelReconciler, LabelReport};
pub use orchestrator::{Orchestrator, RunFailure, RunOutcome, RunState, TransferOutputs};
pub use planner::{plan, BridgeState, TransferMode, TransferPlan};
pub use router::{Route, RouteDecision, RouteSource, Router};
pub use stub::{StubIssue, StubManager, StubStep};
pub use transfer::TransferExecutor;
