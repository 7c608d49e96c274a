//! Workflow run context and event payload
//!
//! Only the parts of the webhook payload an issue event carries are modeled;
//! unknown fields are ignored.

use crate::error::RuntimeError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment provided by the runner for every step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsContext {
    /// Name of the triggering event (e.g., "issues")
    pub event_name: Option<String>,

    /// Path to the JSON webhook payload
    pub event_path: Option<PathBuf>,

    /// "owner/repo" of the workflow repository
    pub repository: Option<String>,

    /// REST base url (differs on GitHub Enterprise Server)
    pub api_url: Option<String>,
}

impl ActionsContext {
    /// Read the context from the `GITHUB_*` environment variables
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            event_name: var("GITHUB_EVENT_NAME"),
            event_path: var("GITHUB_EVENT_PATH").map(PathBuf::from),
            repository: var("GITHUB_REPOSITORY"),
            api_url: var("GITHUB_API_URL"),
        }
    }

    /// Split `GITHUB_REPOSITORY` into owner and name
    pub fn repository_slug(&self) -> Result<(String, String), RuntimeError> {
        let slug = self
            .repository
            .as_deref()
            .ok_or(RuntimeError::MissingEnv("GITHUB_REPOSITORY"))?;

        match slug.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok((owner.to_string(), name.to_string()))
            }
            _ => Err(RuntimeError::InvalidRepositorySlug(slug.to_string())),
        }
    }

    /// Load the webhook payload of the triggering event
    pub fn event(&self) -> Result<EventPayload, RuntimeError> {
        let path = self
            .event_path
            .as_deref()
            .ok_or(RuntimeError::MissingEnv("GITHUB_EVENT_PATH"))?;
        load_event(path)
    }
}

/// Read and parse a webhook payload file
pub fn load_event(path: &Path) -> Result<EventPayload, RuntimeError> {
    let content = std::fs::read_to_string(path).map_err(|source| RuntimeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Webhook payload of an issue event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Activity type (e.g., "labeled", "opened")
    pub action: Option<String>,

    pub issue: Option<IssuePayload>,

    pub repository: Option<RepositoryPayload>,

    /// The label that was added, present for `labeled` activity
    pub label: Option<LabelPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub node_id: String,
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub body: Option<String>,
    pub user: UserPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub node_id: String,
    pub name: String,
    #[serde(default)]
    pub private: bool,
    pub owner: OwnerPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    pub login: String,
    /// "User" or "Organization"
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    pub name: String,
}
