//! GitHub client trait definition
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy. It covers exactly the repository, issue
//! and label operations the issue router needs.

use crate::types::{Issue, Label, LockReason, OwnerKind, Repository, TransferredIssue, Visibility};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Defines the interface for interacting with the GitHub API.
/// The production implementation is `OctocrabClient`; tests substitute
/// an in-memory double that records the calls it receives.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::GitHubClient;
///
/// async fn is_private(client: &dyn GitHubClient) -> anyhow::Result<bool> {
///     let repo = client.get_repository("octo-org", "triage").await?;
///     Ok(repo.visibility.is_private())
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    // === Repository Operations ===

    /// Fetch a repository
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `name` - Repository name
    ///
    /// # Returns
    ///
    /// The repository with its node id and visibility, or an error if it
    /// is not found or not accessible with the current token.
    async fn get_repository(&self, owner: &str, name: &str) -> anyhow::Result<Repository>;

    /// Create a repository in the given owner's namespace
    ///
    /// # Arguments
    ///
    /// * `owner` - Account that will own the repository
    /// * `owner_kind` - Whether `owner` is a user or an organization
    /// * `name` - Name of the new repository
    /// * `visibility` - Initial visibility
    /// * `description` - Repository description
    ///
    /// # Returns
    ///
    /// The created repository. Fails if the name is already taken.
    async fn create_repository(
        &self,
        owner: &str,
        owner_kind: OwnerKind,
        name: &str,
        visibility: Visibility,
        description: &str,
    ) -> anyhow::Result<Repository>;

    /// Change the visibility of an existing repository
    ///
    /// # Returns
    ///
    /// The repository as reported after the update
    async fn set_repository_visibility(
        &self,
        owner: &str,
        name: &str,
        visibility: Visibility,
    ) -> anyhow::Result<Repository>;

    /// Delete a repository
    ///
    /// Requires the `delete_repo` scope on the token.
    async fn delete_repository(&self, owner: &str, name: &str) -> anyhow::Result<()>;

    // === Issue Operations ===

    /// Transfer an issue into another repository
    ///
    /// # Arguments
    ///
    /// * `issue_id` - Node id of the issue to move
    /// * `repository_id` - Node id of the destination repository
    /// * `create_labels_if_missing` - Let GitHub create labels the issue carries
    ///   but the destination lacks
    /// * `client_mutation_id` - Dedupe token for this single mutation
    ///
    /// # Returns
    ///
    /// The new identity of the issue in the destination repository
    async fn transfer_issue(
        &self,
        issue_id: &str,
        repository_id: &str,
        create_labels_if_missing: bool,
        client_mutation_id: &str,
    ) -> anyhow::Result<TransferredIssue>;

    /// Open a new issue
    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Issue>;

    /// Post a comment on an issue
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> anyhow::Result<()>;

    /// Close an issue
    async fn close_issue(&self, owner: &str, repo: &str, issue_number: u64) -> anyhow::Result<()>;

    /// Lock the conversation on an issue
    async fn lock_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        reason: LockReason,
    ) -> anyhow::Result<()>;

    // === Label Operations ===

    /// List every label defined on a repository
    async fn list_labels(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Label>>;

    /// Create a label on a repository
    ///
    /// # Arguments
    ///
    /// * `color` - Hex color without the leading '#'
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> anyhow::Result<Label>;

    /// Add labels to an issue, keeping the labels it already has
    ///
    /// # Returns
    ///
    /// The complete label set of the issue after the update
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>>;
}
