//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the router's domain models
//! to keep this crate pure and reusable.

use serde::{Deserialize, Serialize};

/// Repository visibility as far as issue transfers are concerned
///
/// GitHub also knows `internal` repositories; they behave like private
/// ones for transfer purposes and are reported as `Private`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone can see the repository
    #[default]
    Public,
    /// Only collaborators can see the repository
    Private,
}

impl Visibility {
    /// Map the REST `private` flag to a visibility
    pub fn from_private(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Visibility::Private)
    }
}

/// Kind of account owning a repository
///
/// Repositories are created through different endpoints depending on
/// whether the owner is a user or an organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    /// A personal account
    #[default]
    User,
    /// An organization account
    Organization,
}

impl OwnerKind {
    /// Convert the `type` field of a GitHub account object
    pub fn from_api_type(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case("organization") {
            OwnerKind::Organization
        } else {
            OwnerKind::User
        }
    }
}

/// A repository from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// GraphQL node id (e.g., "R_kgDOH...")
    pub id: String,

    /// Owner login
    pub owner: String,

    /// Whether the owner is a user or an organization
    pub owner_kind: OwnerKind,

    /// Repository name without the owner
    pub name: String,

    /// Public or private
    pub visibility: Visibility,

    /// Repository URL for opening in browser
    pub html_url: String,
}

impl Repository {
    /// Full repository name in "owner/name" format
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// An issue from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// GraphQL node id
    pub id: String,

    /// Issue number (e.g., 123)
    pub number: u64,

    /// Issue title
    pub title: String,

    /// Issue body
    pub body: Option<String>,

    /// Author's GitHub username
    pub author: String,

    /// Issue URL for opening in browser
    pub html_url: String,
}

/// The identity of an issue after a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferredIssue {
    /// GraphQL node id in the destination repository
    pub id: String,

    /// Issue number in the destination repository
    pub number: u64,

    /// Issue URL in the destination repository
    pub url: String,
}

/// A repository label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label name
    pub name: String,

    /// Hex color without the leading '#'
    pub color: String,
}

/// Reason given when locking an issue conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockReason {
    #[serde(rename = "off-topic")]
    OffTopic,
    #[serde(rename = "too heated")]
    TooHeated,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "spam")]
    Spam,
}

impl LockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockReason::OffTopic => "off-topic",
            LockReason::TooHeated => "too heated",
            LockReason::Resolved => "resolved",
            LockReason::Spam => "spam",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_from_private() {
        assert_eq!(Visibility::from_private(true), Visibility::Private);
        assert_eq!(Visibility::from_private(false), Visibility::Public);
        assert!(Visibility::Private.is_private());
        assert!(!Visibility::Public.is_private());
    }

    #[test]
    fn test_owner_kind_from_api_type() {
        assert_eq!(OwnerKind::from_api_type("Organization"), OwnerKind::Organization);
        assert_eq!(OwnerKind::from_api_type("organization"), OwnerKind::Organization);
        assert_eq!(OwnerKind::from_api_type("User"), OwnerKind::User);
        assert_eq!(OwnerKind::from_api_type("Bot"), OwnerKind::User);
    }

    #[test]
    fn test_repository_full_name() {
        let repo = Repository {
            id: "R_1".to_string(),
            owner: "octo-org".to_string(),
            owner_kind: OwnerKind::Organization,
            name: "triage".to_string(),
            visibility: Visibility::Public,
            html_url: "https://github.com/octo-org/triage".to_string(),
        };
        assert_eq!(repo.full_name(), "octo-org/triage");
    }

    #[test]
    fn test_lock_reason_serde() {
        let reasons = vec![
            (LockReason::OffTopic, "\"off-topic\""),
            (LockReason::TooHeated, "\"too heated\""),
            (LockReason::Resolved, "\"resolved\""),
            (LockReason::Spam, "\"spam\""),
        ];

        for (reason, expected_json) in reasons {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, expected_json);
            assert_eq!(format!("\"{}\"", reason.as_str()), expected_json);
        }
    }
}
