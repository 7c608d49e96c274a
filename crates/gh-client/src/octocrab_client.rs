//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Repository endpoints go through raw REST routes with local payload types,
//! the issue transfer through the GraphQL API.

use crate::client::GitHubClient;
use crate::types::{
    Issue, Label, LockReason, OwnerKind, Repository, TransferredIssue, Visibility,
};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const TRANSFER_ISSUE_MUTATION: &str = r#"mutation($input: TransferIssueInput!) {
    transferIssue(input: $input) {
        issue {
            id
            number
            url
        }
    }
}"#;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }
}

/// Repository object as returned by the REST API
#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    node_id: String,
    name: String,
    private: bool,
    html_url: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
    #[serde(rename = "type")]
    kind: String,
}

impl From<RepositoryPayload> for Repository {
    fn from(payload: RepositoryPayload) -> Self {
        Repository {
            id: payload.node_id,
            owner: payload.owner.login,
            owner_kind: OwnerKind::from_api_type(&payload.owner.kind),
            name: payload.name,
            visibility: Visibility::from_private(payload.private),
            html_url: payload.html_url,
        }
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn get_repository(&self, owner: &str, name: &str) -> anyhow::Result<Repository> {
        debug!("Fetching repository {}/{}", owner, name);

        let route = format!("/repos/{}/{}", owner, name);
        let payload: RepositoryPayload = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .with_context(|| format!("Failed to fetch repository {}/{}", owner, name))?;

        Ok(payload.into())
    }

    async fn create_repository(
        &self,
        owner: &str,
        owner_kind: OwnerKind,
        name: &str,
        visibility: Visibility,
        description: &str,
    ) -> anyhow::Result<Repository> {
        debug!(
            "Creating {:?} repository {}/{} ({:?} owner)",
            visibility, owner, name, owner_kind
        );

        // Personal repositories can only be created for the authenticated user
        let route = match owner_kind {
            OwnerKind::Organization => format!("/orgs/{}/repos", owner),
            OwnerKind::User => "/user/repos".to_string(),
        };
        let body = json!({
            "name": name,
            "description": description,
            "private": visibility.is_private(),
            "has_issues": true,
            "auto_init": false,
        });

        let payload: RepositoryPayload = self
            .octocrab
            .post(route, Some(&body))
            .await
            .with_context(|| format!("Failed to create repository {}/{}", owner, name))?;

        Ok(payload.into())
    }

    async fn set_repository_visibility(
        &self,
        owner: &str,
        name: &str,
        visibility: Visibility,
    ) -> anyhow::Result<Repository> {
        debug!("Setting {}/{} visibility to {:?}", owner, name, visibility);

        let route = format!("/repos/{}/{}", owner, name);
        let body = json!({ "private": visibility.is_private() });
        let payload: RepositoryPayload = self
            .octocrab
            .patch(route, Some(&body))
            .await
            .with_context(|| format!("Failed to change visibility of {}/{}", owner, name))?;

        Ok(payload.into())
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> anyhow::Result<()> {
        debug!("Deleting repository {}/{}", owner, name);

        self.octocrab
            .repos(owner, name)
            .delete()
            .await
            .with_context(|| format!("Failed to delete repository {}/{}", owner, name))?;

        Ok(())
    }

    async fn transfer_issue(
        &self,
        issue_id: &str,
        repository_id: &str,
        create_labels_if_missing: bool,
        client_mutation_id: &str,
    ) -> anyhow::Result<TransferredIssue> {
        debug!(
            "Transferring issue {} to repository {} (mutation {})",
            issue_id, repository_id, client_mutation_id
        );

        let payload = json!({
            "query": TRANSFER_ISSUE_MUTATION,
            "variables": {
                "input": {
                    "clientMutationId": client_mutation_id,
                    "issueId": issue_id,
                    "repositoryId": repository_id,
                    "createLabelsIfMissing": create_labels_if_missing,
                }
            }
        });

        let response: serde_json::Value = self
            .octocrab
            .graphql(&payload)
            .await
            .with_context(|| format!("Failed to transfer issue {}", issue_id))?;

        parse_transfer_response(response)
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Issue> {
        debug!("Creating issue in {}/{}", owner, repo);

        let issue = self
            .octocrab
            .issues(owner, repo)
            .create(title)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Failed to create issue in {}/{}", owner, repo))?;

        Ok(Issue {
            id: issue.node_id,
            number: issue.number,
            title: issue.title,
            body: issue.body,
            author: issue.user.login,
            html_url: issue.html_url.to_string(),
        })
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        debug!("Commenting on {}/{}#{}", owner, repo, issue_number);

        self.octocrab
            .issues(owner, repo)
            .create_comment(issue_number, body)
            .await
            .with_context(|| format!("Failed to comment on {}/{}#{}", owner, repo, issue_number))?;

        Ok(())
    }

    async fn close_issue(&self, owner: &str, repo: &str, issue_number: u64) -> anyhow::Result<()> {
        debug!("Closing {}/{}#{}", owner, repo, issue_number);

        self.octocrab
            .issues(owner, repo)
            .update(issue_number)
            .state(octocrab::models::IssueState::Closed)
            .send()
            .await
            .with_context(|| format!("Failed to close {}/{}#{}", owner, repo, issue_number))?;

        Ok(())
    }

    async fn lock_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        reason: LockReason,
    ) -> anyhow::Result<()> {
        debug!(
            "Locking {}/{}#{} as {}",
            owner,
            repo,
            issue_number,
            reason.as_str()
        );

        self.octocrab
            .issues(owner, repo)
            .lock(issue_number, Some(convert_lock_reason(reason)))
            .await
            .with_context(|| format!("Failed to lock {}/{}#{}", owner, repo, issue_number))?;

        Ok(())
    }

    async fn list_labels(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Label>> {
        debug!("Listing labels for {}/{}", owner, repo);

        let mut labels = Vec::new();
        let mut page_num = 1u32;
        const PER_PAGE: u8 = 100;

        loop {
            let page = self
                .octocrab
                .issues(owner, repo)
                .list_labels_for_repo()
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await
                .with_context(|| format!("Failed to list labels for {}/{}", owner, repo))?;

            let page_len = page.items.len();
            labels.extend(page.items.into_iter().map(|label| Label {
                name: label.name,
                color: label.color,
            }));

            if page_len < PER_PAGE as usize {
                break;
            }

            page_num += 1;
        }

        debug!("Found {} labels in {}/{}", labels.len(), owner, repo);
        Ok(labels)
    }

    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> anyhow::Result<Label> {
        debug!("Creating label '{}' (#{}) in {}/{}", name, color, owner, repo);

        let label = self
            .octocrab
            .issues(owner, repo)
            .create_label(name, color, "")
            .await
            .with_context(|| format!("Failed to create label '{}' in {}/{}", name, owner, repo))?;

        Ok(Label {
            name: label.name,
            color: label.color,
        })
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>> {
        debug!(
            "Adding labels {:?} to {}/{}#{}",
            labels, owner, repo, issue_number
        );

        let applied = self
            .octocrab
            .issues(owner, repo)
            .add_labels(issue_number, labels)
            .await
            .with_context(|| {
                format!("Failed to label {}/{}#{}", owner, repo, issue_number)
            })?;

        Ok(applied
            .into_iter()
            .map(|label| Label {
                name: label.name,
                color: label.color,
            })
            .collect())
    }
}

/// Issue identity inside a `transferIssue` response
#[derive(Debug, Deserialize)]
struct TransferredIssuePayload {
    id: String,
    number: u64,
    url: String,
}

/// Extract the transferred issue from a GraphQL response body
///
/// GraphQL reports business-rule rejections (e.g. private to public) with
/// HTTP 200 and an `errors` array, so the body must be checked explicitly.
fn parse_transfer_response(response: serde_json::Value) -> anyhow::Result<TransferredIssue> {
    if let Some(errors) = response.get("errors") {
        return Err(anyhow!("GraphQL error: {}", errors));
    }

    let issue = response
        .pointer("/data/transferIssue/issue")
        .filter(|issue| !issue.is_null())
        .cloned()
        .ok_or_else(|| anyhow!("transferIssue response did not contain an issue"))?;

    let issue: TransferredIssuePayload =
        serde_json::from_value(issue).context("Unexpected transferIssue response shape")?;

    Ok(TransferredIssue {
        id: issue.id,
        number: issue.number,
        url: issue.url,
    })
}

/// Convert our LockReason to the octocrab parameter
fn convert_lock_reason(reason: LockReason) -> octocrab::params::LockReason {
    match reason {
        LockReason::OffTopic => octocrab::params::LockReason::OffTopic,
        LockReason::TooHeated => octocrab::params::LockReason::TooHeated,
        LockReason::Resolved => octocrab::params::LockReason::Resolved,
        LockReason::Spam => octocrab::params::LockReason::Spam,
    }
}

/// HTTP status of a failed GitHub call, if the error came from the API
pub fn status_code(err: &anyhow::Error) -> Option<u16> {
    err.chain()
        .find_map(|cause| match cause.downcast_ref::<octocrab::Error>() {
            Some(octocrab::Error::GitHub { source, .. }) => Some(source.status_code.as_u16()),
            _ => None,
        })
}
