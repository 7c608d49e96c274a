//! GitHub Actions runtime
//!
//! The runner-facing half of an action: reading inputs, loading the event
//! payload, issuing workflow commands (::group::, ::error::, ::warning::,
//! ::notice::) and publishing step outputs.
//!
//! # Example
//!
//! ```no_run
//! use gh_actions_runtime::{issue, EnvInputs, FileOutputs, InputSource, OutputSink, WorkflowCommand};
//!
//! let router = EnvInputs.get("router");
//! issue(&WorkflowCommand::notice(format!("router = {:?}", router)));
//!
//! let mut outputs = FileOutputs::from_env();
//! outputs.set_output("destination_repo", "triage")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod commands;
mod error;
mod event;
mod inputs;
mod outputs;
mod types;

pub use commands::{escape_data, escape_property, issue};
pub use error::RuntimeError;
pub use event::{
    load_event, ActionsContext, EventPayload, IssuePayload, LabelPayload, OwnerPayload,
    RepositoryPayload, UserPayload,
};
pub use inputs::{input_env_key, EnvInputs, InputSource};
pub use outputs::{FileOutputs, OutputSink, RecordedOutputs};
pub use types::*;
