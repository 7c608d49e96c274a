//! GitHub API client for the issue router
//!
//! This crate provides a trait-based GitHub API client covering the
//! repository, issue and label operations needed to move an issue between
//! repositories.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - get/create/delete repository                  │
//! │  - transfer_issue()                              │
//! │  - create/comment/close/lock issue               │
//! │  - list/create/add labels                        │
//! └─────────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┴───────────────┐
//!        ▼                               ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │         │ test doubles         │
//! │ (direct API)    │         │ (recording mocks)    │
//! └─────────────────┘         └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{connect, GitHubClient, TokenResolver};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let token = TokenResolver::new(None).resolve()?;
//! let client = connect(token, None)?;
//!
//! let repo = client.get_repository("octo-org", "triage").await?;
//! println!("{} is {:?}", repo.full_name(), repo.visibility);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod octocrab_client;
pub mod types;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

/// REST base url of the public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub use auth::{connect, TokenResolver};
pub use client::GitHubClient;
pub use octocrab_client::{status_code, OctocrabClient};
pub use types::{Issue, Label, LockReason, OwnerKind, Repository, TransferredIssue, Visibility};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
