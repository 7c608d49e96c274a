//! Run orchestration
//!
//! Sequences one run as a state machine:
//!
//! ```text
//! Init → Resolving ─┬─ NoMatch ──────────────────────────────────→ Done
//!                   └─ Transferring → StubPending → LabelPending → Done
//! ```
//!
//! Any error moves the run to `Failed` and skips the remaining states.
//! Outputs computed before the failure are kept so they can still be
//! published.

use crate::context::SourceContext;
use crate::error::RunError;
use crate::labels::LabelReconciler;
use crate::planner::{self, TransferMode, TransferPlan};
use crate::router::{RouteDecision, RouteSource, Router};
use crate::stub::StubManager;
use crate::transfer::TransferExecutor;
use chrono::Utc;
use gh_actions_runtime::{OutputSink, RuntimeError};
use gh_client::GitHubClient;
use gh_issue_router_config::ActionConfig;

/// Output names as declared in action.yml
pub mod output {
    pub const TRANSFERRED_ISSUE_NUMBER: &str = "transferred_issue_number";
    pub const TRANSFERRED_ISSUE_URL: &str = "transferred_issue_url";
    pub const TRANSFERRED_ISSUE_ID: &str = "transferred_issue_id";
    pub const DESTINATION_REPO: &str = "destination_repo";
    pub const STUB_ISSUE_NUMBER: &str = "stub_issue_number";
    pub const STATUS: &str = "status";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    Resolving,
    Transferring,
    StubPending,
    LabelPending,
    Done,
    Failed,
}

/// Step outputs gathered during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOutputs {
    pub transferred_issue_number: Option<u64>,
    pub transferred_issue_url: Option<String>,
    pub transferred_issue_id: Option<String>,
    /// Destination as configured (`repo` or `owner/repo`)
    pub destination_repo: Option<String>,
    pub stub_issue_number: Option<u64>,
}

impl TransferOutputs {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Publish every output that has a value
    pub fn write(&self, sink: &mut impl OutputSink) -> Result<(), RuntimeError> {
        if let Some(number) = self.transferred_issue_number {
            sink.set_output(output::TRANSFERRED_ISSUE_NUMBER, &number.to_string())?;
        }
        if let Some(ref url) = self.transferred_issue_url {
            sink.set_output(output::TRANSFERRED_ISSUE_URL, url)?;
        }
        if let Some(ref id) = self.transferred_issue_id {
            sink.set_output(output::TRANSFERRED_ISSUE_ID, id)?;
        }
        if let Some(ref repo) = self.destination_repo {
            sink.set_output(output::DESTINATION_REPO, repo)?;
        }
        if let Some(number) = self.stub_issue_number {
            sink.set_output(output::STUB_ISSUE_NUMBER, &number.to_string())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The label does not route anywhere; not an error
    NotRouted { label: Option<String> },
    Transferred {
        outputs: TransferOutputs,
        /// Non-fatal problems to surface as warnings
        warnings: Vec<String>,
    },
}

/// A failed run with what it managed to do
#[derive(Debug)]
pub struct RunFailure {
    /// State the run was in when it failed
    pub state: RunState,
    pub outputs: TransferOutputs,
    /// Non-fatal problems hit before the failure
    pub warnings: Vec<String>,
    pub error: RunError,
}

pub struct Orchestrator<'a> {
    client: &'a dyn GitHubClient,
    config: &'a ActionConfig,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(client: &'a dyn GitHubClient, config: &'a ActionConfig) -> Self {
        Self {
            client,
            config,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn enter(&mut self, state: RunState) {
        log::debug!("{:?} → {:?}", self.state, state);
        self.state = state;
    }

    /// Execute the run for the given source context
    pub async fn run(&mut self, context: &SourceContext) -> Result<RunOutcome, RunFailure> {
        let mut outputs = TransferOutputs::default();
        let mut warnings = Vec::new();
        match self.run_states(context, &mut outputs, &mut warnings).await {
            Ok(outcome) => {
                self.enter(RunState::Done);
                Ok(outcome)
            }
            Err(error) => {
                let state = self.state;
                self.enter(RunState::Failed);
                Err(RunFailure {
                    state,
                    outputs,
                    warnings,
                    error,
                })
            }
        }
    }

    async fn run_states(
        &mut self,
        context: &SourceContext,
        outputs: &mut TransferOutputs,
        warnings: &mut Vec<String>,
    ) -> Result<RunOutcome, RunError> {
        self.enter(RunState::Resolving);
        let router = Router::new(
            self.config.router.clone(),
            self.config.enable_custom_label_routing,
        );
        let label = context.trigger_label.as_ref().map(|l| l.name.as_str());
        let route = match router.resolve(label) {
            RouteDecision::Route(route) => route,
            RouteDecision::NoMatch { label } => return Ok(RunOutcome::NotRouted { label }),
        };
        if route.source == RouteSource::CustomLabel {
            log::info!("Routing by custom label to {}", route.destination);
        }

        let source = &context.repository;
        let owner = route.destination.owner_or(&source.owner);
        let destination = self
            .client
            .get_repository(owner, &route.destination.name)
            .await
            .map_err(|err| RunError::Destination {
                repo: route.destination.to_string(),
                source: err,
            })?;

        self.enter(RunState::Transferring);
        let plan = TransferPlan::new(
            source,
            destination,
            self.config.allow_private_public_transfer,
            Utc::now(),
        );
        if plan.mode == TransferMode::Direct
            && source.visibility.is_private()
            && !plan.destination.visibility.is_private()
        {
            log::warn!(
                "Moving an issue from private {} to public {} is normally rejected; \
                 set allow_private_public_transfer to transfer through a bridge repository",
                source.full_name(),
                plan.destination.full_name()
            );
        }
        log::info!(
            "Transferring issue {} from {} to {}",
            context.issue.id,
            source.full_name(),
            plan.destination.full_name()
        );

        let executor = TransferExecutor::new(self.client, self.config.create_labels_if_missing);
        let transfer =
            planner::execute(self.client, &executor, source, &context.issue.id, &plan).await?;
        let transferred = transfer.transferred;
        warnings.extend(transfer.warnings);
        outputs.transferred_issue_number = Some(transferred.number);
        outputs.transferred_issue_url = Some(transferred.url.clone());
        outputs.transferred_issue_id = Some(transferred.id.clone());
        outputs.destination_repo = Some(route.destination.to_string());
        log::info!("Issue transferred to {}", transferred.url);

        self.enter(RunState::StubPending);
        let stub = StubManager::new(self.client)
            .maybe_create_stub(
                self.config.create_stub,
                source,
                &context.issue,
                &transferred.url,
            )
            .await
            .map_err(|err| {
                outputs.stub_issue_number = err.stub_number;
                err
            })?;
        outputs.stub_issue_number = stub.map(|stub| stub.number);

        self.enter(RunState::LabelPending);
        let destination = &plan.destination;
        LabelReconciler::new(self.client)
            .ensure_and_apply(
                &destination.owner,
                &destination.name,
                &self.config.labels,
                transferred.number,
            )
            .await
            .map_err(|err| RunError::Labels {
                repo: destination.full_name(),
                source: err,
            })?;

        Ok(RunOutcome::Transferred {
            outputs: outputs.clone(),
            warnings: warnings.clone(),
        })
    }
}
