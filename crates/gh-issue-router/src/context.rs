//! Source context
//!
//! Everything the run needs to know about the triggering event, captured
//! once at the boundary. Core logic only ever sees a `SourceContext`.

use crate::error::{ContextError, RunError};
use gh_actions_runtime::EventPayload;
use gh_client::{GitHubClient, OwnerKind, Visibility};
use gh_issue_router_config::TestOverride;

/// The repository the issue currently lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRepository {
    pub owner: String,
    pub owner_kind: OwnerKind,
    pub name: String,
    /// GraphQL node id
    pub id: String,
    pub visibility: Visibility,
}

impl SourceRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// The issue to move
///
/// In test mode only the node id is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub id: String,
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLabel {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub repository: SourceRepository,
    pub issue: SourceIssue,
    /// Absent for activity types that carry no label (e.g., `opened`)
    pub trigger_label: Option<TriggerLabel>,
}

impl SourceContext {
    /// Build the context from an issue event payload
    pub fn from_event(event: &EventPayload) -> Result<Self, ContextError> {
        let issue = event.issue.as_ref().ok_or(ContextError::NotAnIssueEvent)?;
        let repository = event
            .repository
            .as_ref()
            .ok_or(ContextError::RepositoryNotSet)?;

        Ok(Self {
            repository: SourceRepository {
                owner: repository.owner.login.clone(),
                owner_kind: repository
                    .owner
                    .kind
                    .as_deref()
                    .map(OwnerKind::from_api_type)
                    .unwrap_or_default(),
                name: repository.name.clone(),
                id: repository.node_id.clone(),
                visibility: Visibility::from_private(repository.private),
            },
            issue: SourceIssue {
                id: issue.node_id.clone(),
                number: Some(issue.number),
                title: Some(issue.title.clone()).filter(|t| !t.is_empty()),
                body: issue.body.clone().filter(|b| !b.is_empty()),
                author: Some(issue.user.login.clone()),
            },
            trigger_label: event.label.as_ref().map(|label| TriggerLabel {
                name: label.name.clone(),
            }),
        })
    }

    /// Synthesize the context for a `test` override
    ///
    /// The repository is looked up so its id and visibility are real; the
    /// issue is known only by its node id.
    pub async fn from_test_override(
        client: &dyn GitHubClient,
        owner: &str,
        name: &str,
        test: &TestOverride,
    ) -> Result<Self, RunError> {
        let repo = client
            .get_repository(owner, name)
            .await
            .map_err(|source| RunError::Destination {
                repo: format!("{}/{}", owner, name),
                source,
            })?;
        log::debug!("Test mode: issue {} in {}", test.issue_id, repo.full_name());

        Ok(Self {
            repository: SourceRepository {
                owner: repo.owner,
                owner_kind: repo.owner_kind,
                name: repo.name,
                id: repo.id,
                visibility: repo.visibility,
            },
            issue: SourceIssue {
                id: test.issue_id.clone(),
                number: None,
                title: None,
                body: None,
                author: None,
            },
            trigger_label: Some(TriggerLabel {
                name: test.label_name.clone(),
            }),
        })
    }
}
