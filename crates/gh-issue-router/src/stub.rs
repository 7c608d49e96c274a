//! Stub issue left behind in the source repository

use crate::context::{SourceIssue, SourceRepository};
use crate::error::StubError;
use gh_client::{GitHubClient, LockReason};
use std::fmt;

const PLACEHOLDER_TITLE: &str = "Transferred issue";
const PLACEHOLDER_BODY: &str = "This issue has been moved to another repository.";

/// Stub lifecycle steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubStep {
    Create,
    Comment,
    Close,
    Lock,
}

impl fmt::Display for StubStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StubStep::Create => "create",
            StubStep::Comment => "comment",
            StubStep::Close => "close",
            StubStep::Lock => "lock",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubIssue {
    pub number: u64,
    pub url: String,
}

/// Comment pointing readers of the stub at the new location
pub fn stub_comment(author: Option<&str>, new_issue_url: &str) -> String {
    let greeting = match author {
        Some(author) => format!("@{} this is a stub issue", author),
        None => "This is a stub issue".to_string(),
    };
    format!(
        "{} that has been created as a placeholder in this repo.\n\n\
         Your original issue has been moved to [{}]({})",
        greeting, new_issue_url, new_issue_url
    )
}

pub struct StubManager<'a> {
    client: &'a dyn GitHubClient,
}

impl<'a> StubManager<'a> {
    pub fn new(client: &'a dyn GitHubClient) -> Self {
        Self { client }
    }

    /// Create, comment on, close and lock a stub when `enabled`
    ///
    /// A failure after creation leaves the stub as it is; the error carries
    /// its number so it can still be reported.
    pub async fn maybe_create_stub(
        &self,
        enabled: bool,
        repo: &SourceRepository,
        issue: &SourceIssue,
        new_issue_url: &str,
    ) -> Result<Option<StubIssue>, StubError> {
        if !enabled {
            return Ok(None);
        }

        let title = issue.title.as_deref().unwrap_or(PLACEHOLDER_TITLE);
        let body = issue.body.as_deref().unwrap_or(PLACEHOLDER_BODY);
        let created = self
            .client
            .create_issue(&repo.owner, &repo.name, title, body)
            .await
            .map_err(|source| StubError {
                stub_number: None,
                step: StubStep::Create,
                source,
            })?;
        let number = created.number;
        log::info!("Created stub issue #{} in {}", number, repo.full_name());

        let fail = |step: StubStep| {
            move |source: anyhow::Error| StubError {
                stub_number: Some(number),
                step,
                source,
            }
        };

        let comment = stub_comment(issue.author.as_deref(), new_issue_url);
        self.client
            .create_comment(&repo.owner, &repo.name, number, &comment)
            .await
            .map_err(fail(StubStep::Comment))?;

        self.client
            .close_issue(&repo.owner, &repo.name, number)
            .await
            .map_err(fail(StubStep::Close))?;

        self.client
            .lock_issue(&repo.owner, &repo.name, number, LockReason::OffTopic)
            .await
            .map_err(fail(StubStep::Lock))?;

        Ok(Some(StubIssue {
            number,
            url: created.html_url,
        }))
    }
}
