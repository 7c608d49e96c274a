//! Label reconciliation on the destination repository

use gh_client::GitHubClient;
use gh_issue_router_config::LabelSpec;
use std::collections::HashSet;

/// What reconciliation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelReport {
    /// Labels that did not exist and were created
    pub created: Vec<String>,
    /// Labels added to the issue
    pub applied: Vec<String>,
}

pub struct LabelReconciler<'a> {
    client: &'a dyn GitHubClient,
}

impl<'a> LabelReconciler<'a> {
    pub fn new(client: &'a dyn GitHubClient) -> Self {
        Self { client }
    }

    /// Make sure every label exists on `owner/repo`, then add them to the issue
    ///
    /// Existing labels are matched case-insensitively, as GitHub does. The
    /// labels are added to those already on the issue.
    pub async fn ensure_and_apply(
        &self,
        owner: &str,
        repo: &str,
        labels: &[LabelSpec],
        issue_number: u64,
    ) -> anyhow::Result<LabelReport> {
        if labels.is_empty() {
            return Ok(LabelReport::default());
        }

        let existing: HashSet<String> = self
            .client
            .list_labels(owner, repo)
            .await?
            .into_iter()
            .map(|label| label.name.to_lowercase())
            .collect();

        let mut report = LabelReport::default();
        for label in labels {
            if existing.contains(&label.name.to_lowercase()) {
                continue;
            }
            log::info!("Creating label '{}' in {}/{}", label.name, owner, repo);
            self.client
                .create_label(owner, repo, &label.name, &label.color)
                .await?;
            report.created.push(label.name.clone());
        }

        let names: Vec<String> = labels.iter().map(|label| label.name.clone()).collect();
        self.client
            .add_labels(owner, repo, issue_number, &names)
            .await?;
        log::info!("Applied labels {:?} to #{}", names, issue_number);
        report.applied = names;

        Ok(report)
    }
}
