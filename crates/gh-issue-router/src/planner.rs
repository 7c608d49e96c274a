//! Visibility transfer planning
//!
//! GitHub refuses to move an issue from a private repository straight into
//! a public one. When allowed, such a move goes through a temporary bridge
//! repository instead:
//!
//! ```text
//! create bridge (private) → transfer in → make bridge public → transfer out → delete bridge
//! ```
//!
//! Completed steps are never rolled back. A failure reports the last state
//! reached so a leftover bridge repository can be found and removed.

use crate::context::SourceRepository;
use crate::error::{BridgeError, RunError};
use crate::transfer::TransferExecutor;
use chrono::{DateTime, Utc};
use gh_client::{GitHubClient, Repository, TransferredIssue, Visibility};
use std::fmt;

const BRIDGE_PREFIX: &str = "issue-transfer";
const BRIDGE_DESCRIPTION: &str = "Temporary repository for an issue transfer, safe to delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Direct,
    Bridged,
}

/// Choose the transfer mode from the two visibilities and the bridging flag
pub fn plan(source_private: bool, dest_private: bool, bridging_enabled: bool) -> TransferMode {
    if source_private && !dest_private && bridging_enabled {
        TransferMode::Bridged
    } else {
        TransferMode::Direct
    }
}

/// Name for a bridge repository: timestamp plus a short random suffix
pub fn bridge_repository_name(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        BRIDGE_PREFIX,
        now.format("%Y%m%d%H%M%S"),
        &suffix[..8]
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub mode: TransferMode,
    pub destination: Repository,
    /// Only set for `Bridged`
    pub bridge_name: Option<String>,
}

impl TransferPlan {
    pub fn new(
        source: &SourceRepository,
        destination: Repository,
        bridging_enabled: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let mode = plan(
            source.visibility.is_private(),
            destination.visibility.is_private(),
            bridging_enabled,
        );
        let bridge_name = match mode {
            TransferMode::Bridged => Some(bridge_repository_name(now)),
            TransferMode::Direct => None,
        };

        Self {
            mode,
            destination,
            bridge_name,
        }
    }
}

/// Progress of the bridged protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    NotStarted,
    Created,
    TransferredIn,
    MadePublic,
    TransferredOut,
    Deleted,
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BridgeState::NotStarted => "not-started",
            BridgeState::Created => "created",
            BridgeState::TransferredIn => "transferred-in",
            BridgeState::MadePublic => "made-public",
            BridgeState::TransferredOut => "transferred-out",
            BridgeState::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Result of executing a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Identity after the last transfer of the plan
    pub transferred: TransferredIssue,
    /// Non-fatal problems, such as a bridge that could not be deleted
    pub warnings: Vec<String>,
}

/// Execute a plan for the given issue
pub async fn execute(
    client: &dyn GitHubClient,
    executor: &TransferExecutor<'_>,
    source: &SourceRepository,
    issue_id: &str,
    plan: &TransferPlan,
) -> Result<TransferOutcome, RunError> {
    match (plan.mode, plan.bridge_name.as_deref()) {
        (TransferMode::Bridged, Some(bridge_name)) => {
            let mut saga = BridgeSaga::new(client, executor, source, bridge_name);
            Ok(saga.run(issue_id, &plan.destination).await?)
        }
        _ => {
            let transferred = executor
                .transfer(issue_id, &plan.destination.id)
                .await
                .map_err(|source| RunError::Transfer {
                    repo: plan.destination.full_name(),
                    source,
                })?;
            Ok(TransferOutcome {
                transferred,
                warnings: Vec::new(),
            })
        }
    }
}

/// The bridged protocol as an explicit state machine
struct BridgeSaga<'a> {
    client: &'a dyn GitHubClient,
    executor: &'a TransferExecutor<'a>,
    source: &'a SourceRepository,
    bridge_name: &'a str,
    state: BridgeState,
}

impl<'a> BridgeSaga<'a> {
    fn new(
        client: &'a dyn GitHubClient,
        executor: &'a TransferExecutor<'a>,
        source: &'a SourceRepository,
        bridge_name: &'a str,
    ) -> Self {
        Self {
            client,
            executor,
            source,
            bridge_name,
            state: BridgeState::NotStarted,
        }
    }

    fn fail(&self, source: anyhow::Error) -> BridgeError {
        BridgeError {
            reached: self.state,
            bridge: (self.state != BridgeState::NotStarted)
                .then(|| format!("{}/{}", self.source.owner, self.bridge_name)),
            source,
        }
    }

    fn advance(&mut self, state: BridgeState) {
        log::debug!("Bridge {}: {} → {}", self.bridge_name, self.state, state);
        self.state = state;
    }

    async fn run(
        &mut self,
        issue_id: &str,
        destination: &Repository,
    ) -> Result<TransferOutcome, BridgeError> {
        let source = self.source;
        let owner = source.owner.as_str();
        let bridge_name = self.bridge_name;
        log::info!(
            "Moving issue through bridge repository {}/{}",
            owner,
            bridge_name
        );

        let bridge = self
            .client
            .create_repository(
                owner,
                source.owner_kind,
                bridge_name,
                Visibility::Private,
                BRIDGE_DESCRIPTION,
            )
            .await
            .map_err(|err| self.fail(err))?;
        self.advance(BridgeState::Created);

        let bridged = self
            .executor
            .transfer(issue_id, &bridge.id)
            .await
            .map_err(|err| self.fail(err))?;
        self.advance(BridgeState::TransferredIn);

        self.client
            .set_repository_visibility(owner, bridge_name, Visibility::Public)
            .await
            .map_err(|err| self.fail(err))?;
        self.advance(BridgeState::MadePublic);

        let transferred = self
            .executor
            .transfer(&bridged.id, &destination.id)
            .await
            .map_err(|err| self.fail(err))?;
        self.advance(BridgeState::TransferredOut);

        let mut warnings = Vec::new();
        match self.client.delete_repository(owner, bridge_name).await {
            Ok(()) => self.advance(BridgeState::Deleted),
            Err(err) => warnings.push(format!(
                "Failed to delete bridge repository {}/{}: {:#}",
                owner, bridge_name, err
            )),
        }

        Ok(TransferOutcome {
            transferred,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repository, Call, MockClient};
    use chrono::TimeZone;
    use gh_client::OwnerKind;

    fn source(visibility: Visibility) -> SourceRepository {
        SourceRepository {
            owner: "octo-org".to_string(),
            owner_kind: OwnerKind::Organization,
            name: "support".to_string(),
            id: "R_octo-org_support".to_string(),
            visibility,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn private_to_public() -> (MockClient, SourceRepository, TransferPlan) {
        let client = MockClient::new()
            .with_repository(repository("octo-org", "support", Visibility::Private))
            .with_repository(repository("octo-org", "public-repo", Visibility::Public))
            .with_issue("I_src", "octo-org/support");
        let source = source(Visibility::Private);
        let plan = TransferPlan::new(
            &source,
            repository("octo-org", "public-repo", Visibility::Public),
            true,
            now(),
        );
        (client, source, plan)
    }

    #[test]
    fn test_plan_all_combinations() {
        for source_private in [false, true] {
            for dest_private in [false, true] {
                for bridging in [false, true] {
                    let expected = if source_private && !dest_private && bridging {
                        TransferMode::Bridged
                    } else {
                        TransferMode::Direct
                    };
                    assert_eq!(
                        plan(source_private, dest_private, bridging),
                        expected,
                        "source_private={} dest_private={} bridging={}",
                        source_private,
                        dest_private,
                        bridging
                    );
                }
            }
        }
    }

    #[test]
    fn test_bridge_repository_name() {
        let name = bridge_repository_name(now());
        assert!(name.starts_with("issue-transfer-20240309140507-"));
        assert_eq!(name.len(), "issue-transfer-20240309140507-".len() + 8);
        assert_ne!(name, bridge_repository_name(now()));
    }

    #[test]
    fn test_transfer_plan_names_bridge_only_when_bridged() {
        let public = repository("octo-org", "public-repo", Visibility::Public);

        let bridged = TransferPlan::new(&source(Visibility::Private), public.clone(), true, now());
        assert_eq!(bridged.mode, TransferMode::Bridged);
        assert!(bridged.bridge_name.is_some());

        let direct = TransferPlan::new(&source(Visibility::Private), public, false, now());
        assert_eq!(direct.mode, TransferMode::Direct);
        assert_eq!(direct.bridge_name, None);
    }

    #[tokio::test]
    async fn test_direct_transfer_makes_one_call() {
        let client = MockClient::new()
            .with_repository(repository("octo-org", "triage", Visibility::Public));
        let source = source(Visibility::Public);
        let plan = TransferPlan::new(
            &source,
            repository("octo-org", "triage", Visibility::Public),
            true,
            now(),
        );
        let executor = TransferExecutor::new(&client, false);

        let outcome = execute(&client, &executor, &source, "I_src", &plan)
            .await
            .unwrap();

        assert_eq!(client.call_kinds(), vec!["transfer_issue"]);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_direct_private_to_public_is_rejected_remotely() {
        let (client, source, _) = private_to_public();
        let plan = TransferPlan::new(
            &source,
            repository("octo-org", "public-repo", Visibility::Public),
            false,
            now(),
        );
        let executor = TransferExecutor::new(&client, false);

        let err = execute(&client, &executor, &source, "I_src", &plan)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Transfer { .. }));
        assert_eq!(client.count("create_repository"), 0);
    }

    #[tokio::test]
    async fn test_bridged_transfer_order_and_final_identity() {
        let (client, source, plan) = private_to_public();
        let executor = TransferExecutor::new(&client, false);
        let bridge_name = plan.bridge_name.clone().unwrap();
        let bridge_full_name = format!("octo-org/{}", bridge_name);

        let outcome = execute(&client, &executor, &source, "I_src", &plan)
            .await
            .unwrap();

        assert_eq!(
            client.call_kinds(),
            vec![
                "create_repository",
                "transfer_issue",
                "set_repository_visibility",
                "transfer_issue",
                "delete_repository",
            ]
        );

        let calls = client.calls();
        assert_eq!(
            calls[0],
            Call::CreateRepository {
                full_name: bridge_full_name.clone(),
                visibility: Visibility::Private,
            }
        );
        assert_eq!(
            calls[2],
            Call::SetVisibility {
                full_name: bridge_full_name.clone(),
                visibility: Visibility::Public,
            }
        );
        assert_eq!(calls[4], Call::DeleteRepository(bridge_full_name.clone()));

        // Transfer out moves the issue id returned by transfer in
        let transfers: Vec<(&str, &str)> = calls
            .iter()
            .filter_map(|call| match call {
                Call::Transfer {
                    issue_id,
                    repository_id,
                    ..
                } => Some((issue_id.as_str(), repository_id.as_str())),
                _ => None,
            })
            .collect();
        let [(in_id, in_repo), (out_id, out_repo)] = transfers[..] else {
            panic!("expected two transfers");
        };
        assert_eq!(in_id, "I_src");
        assert_eq!(in_repo, format!("R_octo-org_{}", bridge_name));
        assert_ne!(out_id, "I_src");
        assert_eq!(out_repo, "R_octo-org_public-repo");

        assert!(outcome
            .transferred
            .url
            .starts_with("https://github.com/octo-org/public-repo/issues/"));
        assert_eq!(&outcome.transferred.id, &format!("I_{}", outcome.transferred.number));
        assert!(outcome.warnings.is_empty());
        assert!(!client.has_repository(&bridge_full_name));
    }

    #[tokio::test]
    async fn test_bridge_cleanup_failure_is_a_warning() {
        let (client, source, plan) = private_to_public();
        let client = client.failing_on("delete_repository");
        let executor = TransferExecutor::new(&client, false);

        let outcome = execute(&client, &executor, &source, "I_src", &plan)
            .await
            .unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains(plan.bridge_name.as_deref().unwrap()));
        assert!(outcome.transferred.url.contains("public-repo"));
    }

    #[tokio::test]
    async fn test_bridge_failure_reports_last_state() {
        let cases = [
            ("create_repository", 1, BridgeState::NotStarted, 1),
            ("transfer_issue", 1, BridgeState::Created, 2),
            ("set_repository_visibility", 1, BridgeState::TransferredIn, 3),
            ("transfer_issue", 2, BridgeState::MadePublic, 4),
        ];

        for (kind, nth, reached, calls_made) in cases {
            let (client, source, plan) = private_to_public();
            let client = client.failing_on_nth(kind, nth);
            let executor = TransferExecutor::new(&client, false);

            let err = execute(&client, &executor, &source, "I_src", &plan)
                .await
                .unwrap_err();

            let RunError::Bridge(err) = err else {
                panic!("expected bridge error for {} #{}", kind, nth);
            };
            assert_eq!(err.reached, reached, "{} #{}", kind, nth);
            assert_eq!(err.bridge.is_some(), reached != BridgeState::NotStarted);
            // No rollback and no further steps
            assert_eq!(client.calls().len(), calls_made, "{} #{}", kind, nth);
            assert_eq!(client.count("delete_repository"), 0);
        }
    }
}
