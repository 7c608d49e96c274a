//! Single issue transfer

use gh_client::{GitHubClient, TransferredIssue};

/// A fresh client mutation id; never reused across transfer attempts
pub fn new_client_mutation_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Moves an issue with one `transferIssue` mutation
pub struct TransferExecutor<'a> {
    client: &'a dyn GitHubClient,
    create_labels_if_missing: bool,
}

impl<'a> TransferExecutor<'a> {
    pub fn new(client: &'a dyn GitHubClient, create_labels_if_missing: bool) -> Self {
        Self {
            client,
            create_labels_if_missing,
        }
    }

    /// Transfer `issue_id` into the repository with node id `repository_id`
    pub async fn transfer(
        &self,
        issue_id: &str,
        repository_id: &str,
    ) -> anyhow::Result<TransferredIssue> {
        let mutation_id = new_client_mutation_id();
        log::debug!(
            "Transferring {} to {} (mutation {})",
            issue_id,
            repository_id,
            mutation_id
        );

        let transferred = self
            .client
            .transfer_issue(
                issue_id,
                repository_id,
                self.create_labels_if_missing,
                &mutation_id,
            )
            .await?;

        log::debug!("Issue is now #{} at {}", transferred.number, transferred.url);
        Ok(transferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repository, Call, MockClient};
    use gh_client::Visibility;

    #[tokio::test]
    async fn test_transfer_forwards_flag_and_fresh_mutation_ids() {
        let client = MockClient::new()
            .with_repository(repository("octo-org", "triage", Visibility::Public))
            .with_repository(repository("octo-org", "backlog", Visibility::Public));
        let executor = TransferExecutor::new(&client, true);

        let first = executor.transfer("I_src", "R_octo-org_triage").await.unwrap();
        executor.transfer(&first.id, "R_octo-org_backlog").await.unwrap();

        let mutation_ids: Vec<String> = client
            .calls()
            .into_iter()
            .map(|call| match call {
                Call::Transfer {
                    create_labels_if_missing,
                    client_mutation_id,
                    ..
                } => {
                    assert!(create_labels_if_missing);
                    client_mutation_id
                }
                other => panic!("unexpected call {:?}", other),
            })
            .collect();

        assert_eq!(mutation_ids.len(), 2);
        assert_ne!(mutation_ids[0], mutation_ids[1]);
        assert_eq!(mutation_ids[0].len(), 32);
    }

    #[tokio::test]
    async fn test_transfer_reports_new_identity() {
        let client =
            MockClient::new().with_repository(repository("octo-org", "triage", Visibility::Public));
        let executor = TransferExecutor::new(&client, false);

        let transferred = executor.transfer("I_src", "R_octo-org_triage").await.unwrap();

        assert_ne!(transferred.id, "I_src");
        assert!(transferred
            .url
            .starts_with("https://github.com/octo-org/triage/issues/"));
    }

    #[tokio::test]
    async fn test_transfer_error_is_returned() {
        let client = MockClient::new();
        let executor = TransferExecutor::new(&client, false);

        let err = executor.transfer("I_src", "R_missing").await.unwrap_err();
        assert!(err.to_string().contains("R_missing"));
    }
}
