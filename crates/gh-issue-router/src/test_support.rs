//! In-memory GitHub double for unit tests
//!
//! Records every call in order and keeps just enough repository, issue and
//! label state to behave like the API for the router's purposes.

use async_trait::async_trait;
use gh_client::{
    GitHubClient, Issue, Label, LockReason, OwnerKind, Repository, TransferredIssue, Visibility,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetRepository(String),
    CreateRepository {
        full_name: String,
        visibility: Visibility,
    },
    SetVisibility {
        full_name: String,
        visibility: Visibility,
    },
    DeleteRepository(String),
    Transfer {
        issue_id: String,
        repository_id: String,
        create_labels_if_missing: bool,
        client_mutation_id: String,
    },
    CreateIssue {
        full_name: String,
        title: String,
        body: String,
    },
    CreateComment {
        full_name: String,
        number: u64,
        body: String,
    },
    CloseIssue {
        full_name: String,
        number: u64,
    },
    LockIssue {
        full_name: String,
        number: u64,
        reason: LockReason,
    },
    ListLabels(String),
    CreateLabel {
        full_name: String,
        name: String,
        color: String,
    },
    AddLabels {
        full_name: String,
        number: u64,
        labels: Vec<String>,
    },
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::GetRepository(_) => "get_repository",
            Call::CreateRepository { .. } => "create_repository",
            Call::SetVisibility { .. } => "set_repository_visibility",
            Call::DeleteRepository(_) => "delete_repository",
            Call::Transfer { .. } => "transfer_issue",
            Call::CreateIssue { .. } => "create_issue",
            Call::CreateComment { .. } => "create_comment",
            Call::CloseIssue { .. } => "close_issue",
            Call::LockIssue { .. } => "lock_issue",
            Call::ListLabels(_) => "list_labels",
            Call::CreateLabel { .. } => "create_label",
            Call::AddLabels { .. } => "add_labels",
        }
    }
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    repositories: BTreeMap<String, Repository>,
    labels: BTreeMap<String, Vec<Label>>,
    /// Issue node id → "owner/name" of the repository holding it
    issue_locations: HashMap<String, String>,
    /// Call kind → which occurrence fails (`None` = every one)
    failures: Vec<(&'static str, Option<usize>)>,
    seen: HashMap<&'static str, usize>,
    next_issue_number: u64,
}

/// Recording mock client
#[derive(Clone, Default)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
}

/// Repository fixture with a predictable node id
pub fn repository(owner: &str, name: &str, visibility: Visibility) -> Repository {
    Repository {
        id: format!("R_{}_{}", owner, name),
        owner: owner.to_string(),
        owner_kind: OwnerKind::Organization,
        name: name.to_string(),
        visibility,
        html_url: format!("https://github.com/{}/{}", owner, name),
    }
}

impl MockClient {
    pub fn new() -> Self {
        let client = Self::default();
        client.state.lock().unwrap().next_issue_number = 100;
        client
    }

    pub fn with_repository(self, repo: Repository) -> Self {
        self.state
            .lock()
            .unwrap()
            .repositories
            .insert(repo.full_name(), repo);
        self
    }

    pub fn with_labels(self, full_name: &str, names: &[&str]) -> Self {
        let labels = names
            .iter()
            .map(|name| Label {
                name: name.to_string(),
                color: "ededed".to_string(),
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .labels
            .insert(full_name.to_string(), labels);
        self
    }

    /// Register where an issue currently lives
    pub fn with_issue(self, issue_id: &str, full_name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .issue_locations
            .insert(issue_id.to_string(), full_name.to_string());
        self
    }

    /// Fail every call of the given kind
    pub fn failing_on(self, kind: &'static str) -> Self {
        self.state.lock().unwrap().failures.push((kind, None));
        self
    }

    /// Fail only the `nth` (1-based) call of the given kind
    pub fn failing_on_nth(self, kind: &'static str, nth: usize) -> Self {
        self.state.lock().unwrap().failures.push((kind, Some(nth)));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_kinds(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::kind).collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.calls().iter().filter(|c| c.kind() == kind).count()
    }

    pub fn has_repository(&self, full_name: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .repositories
            .contains_key(full_name)
    }

    pub fn repository_names(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .repositories
            .keys()
            .cloned()
            .collect()
    }

    /// Record a call and apply injected failures
    fn record(&self, call: Call) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        let kind = call.kind();
        state.calls.push(call);
        let seen = {
            let count = state.seen.entry(kind).or_insert(0);
            *count += 1;
            *count
        };

        let fails = state
            .failures
            .iter()
            .any(|(k, nth)| *k == kind && nth.map_or(true, |n| n == seen));
        if fails {
            anyhow::bail!("injected failure on {} #{}", kind, seen);
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubClient for MockClient {
    async fn get_repository(&self, owner: &str, name: &str) -> anyhow::Result<Repository> {
        let full_name = format!("{}/{}", owner, name);
        self.record(Call::GetRepository(full_name.clone()))?;
        self.state
            .lock()
            .unwrap()
            .repositories
            .get(&full_name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Not Found: {}", full_name))
    }

    async fn create_repository(
        &self,
        owner: &str,
        owner_kind: OwnerKind,
        name: &str,
        visibility: Visibility,
        _description: &str,
    ) -> anyhow::Result<Repository> {
        let full_name = format!("{}/{}", owner, name);
        self.record(Call::CreateRepository {
            full_name: full_name.clone(),
            visibility,
        })?;

        let mut state = self.state.lock().unwrap();
        if state.repositories.contains_key(&full_name) {
            anyhow::bail!("name already exists on this account: {}", full_name);
        }
        let mut repo = repository(owner, name, visibility);
        repo.owner_kind = owner_kind;
        state.repositories.insert(full_name, repo.clone());
        Ok(repo)
    }

    async fn set_repository_visibility(
        &self,
        owner: &str,
        name: &str,
        visibility: Visibility,
    ) -> anyhow::Result<Repository> {
        let full_name = format!("{}/{}", owner, name);
        self.record(Call::SetVisibility {
            full_name: full_name.clone(),
            visibility,
        })?;

        let mut state = self.state.lock().unwrap();
        let repo = state
            .repositories
            .get_mut(&full_name)
            .ok_or_else(|| anyhow::anyhow!("Not Found: {}", full_name))?;
        repo.visibility = visibility;
        Ok(repo.clone())
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> anyhow::Result<()> {
        let full_name = format!("{}/{}", owner, name);
        self.record(Call::DeleteRepository(full_name.clone()))?;
        self.state.lock().unwrap().repositories.remove(&full_name);
        Ok(())
    }

    async fn transfer_issue(
        &self,
        issue_id: &str,
        repository_id: &str,
        create_labels_if_missing: bool,
        client_mutation_id: &str,
    ) -> anyhow::Result<TransferredIssue> {
        self.record(Call::Transfer {
            issue_id: issue_id.to_string(),
            repository_id: repository_id.to_string(),
            create_labels_if_missing,
            client_mutation_id: client_mutation_id.to_string(),
        })?;

        let mut state = self.state.lock().unwrap();
        let destination = state
            .repositories
            .values()
            .find(|repo| repo.id == repository_id)
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("Could not resolve to a Repository with id {}", repository_id)
            })?;

        let origin = state
            .issue_locations
            .get(issue_id)
            .and_then(|full_name| state.repositories.get(full_name));
        if let Some(origin) = origin {
            if origin.visibility.is_private() && !destination.visibility.is_private() {
                anyhow::bail!("Cannot transfer an issue from a private repository to a public one");
            }
        }

        state.next_issue_number += 1;
        let number = state.next_issue_number;
        let new_id = format!("I_{}", number);
        state
            .issue_locations
            .insert(new_id.clone(), destination.full_name());

        Ok(TransferredIssue {
            id: new_id,
            number,
            url: format!("{}/issues/{}", destination.html_url, number),
        })
    }

    async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
    ) -> anyhow::Result<Issue> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(Call::CreateIssue {
            full_name: full_name.clone(),
            title: title.to_string(),
            body: body.to_string(),
        })?;

        let mut state = self.state.lock().unwrap();
        state.next_issue_number += 1;
        let number = state.next_issue_number;
        Ok(Issue {
            id: format!("I_{}", number),
            number,
            title: title.to_string(),
            body: Some(body.to_string()),
            author: "github-actions[bot]".to_string(),
            html_url: format!("https://github.com/{}/issues/{}", full_name, number),
        })
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::CreateComment {
            full_name: format!("{}/{}", owner, repo),
            number: issue_number,
            body: body.to_string(),
        })
    }

    async fn close_issue(&self, owner: &str, repo: &str, issue_number: u64) -> anyhow::Result<()> {
        self.record(Call::CloseIssue {
            full_name: format!("{}/{}", owner, repo),
            number: issue_number,
        })
    }

    async fn lock_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        reason: LockReason,
    ) -> anyhow::Result<()> {
        self.record(Call::LockIssue {
            full_name: format!("{}/{}", owner, repo),
            number: issue_number,
            reason,
        })
    }

    async fn list_labels(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<Label>> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(Call::ListLabels(full_name.clone()))?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .labels
            .get(&full_name)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        name: &str,
        color: &str,
    ) -> anyhow::Result<Label> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(Call::CreateLabel {
            full_name: full_name.clone(),
            name: name.to_string(),
            color: color.to_string(),
        })?;

        let label = Label {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.state
            .lock()
            .unwrap()
            .labels
            .entry(full_name)
            .or_default()
            .push(label.clone());
        Ok(label)
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> anyhow::Result<Vec<Label>> {
        let full_name = format!("{}/{}", owner, repo);
        self.record(Call::AddLabels {
            full_name: full_name.clone(),
            number: issue_number,
            labels: labels.to_vec(),
        })?;

        let state = self.state.lock().unwrap();
        let known = state.labels.get(&full_name).cloned().unwrap_or_default();
        labels
            .iter()
            .map(|name| {
                known
                    .iter()
                    .find(|label| label.name.eq_ignore_ascii_case(name))
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("Label does not exist: {}", name))
            })
            .collect()
    }
}
