//! Routing rules
//!
//! A router is either an inline rule (`label:repo` or just `repo`) or a
//! label → repository mapping loaded from a YAML file.

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::fmt;

/// A destination repository as written in the configuration
///
/// Without an owner the repository lives next to the source repository.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RepoTarget {
    pub owner: Option<String>,
    pub name: String,
}

impl RepoTarget {
    /// Parse `repo` or `owner/repo`
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let invalid = || ConfigError::InvalidRepository(raw.to_string());

        match raw.split_once('/') {
            None if is_valid_segment(raw) => Ok(Self {
                owner: None,
                name: raw.to_string(),
            }),
            Some((owner, name)) if is_valid_segment(owner) && is_valid_segment(name) => {
                Ok(Self {
                    owner: Some(owner.to_string()),
                    name: name.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }

    /// Owner to use, falling back to the source repository's owner
    pub fn owner_or<'a>(&'a self, default_owner: &'a str) -> &'a str {
        self.owner.as_deref().unwrap_or(default_owner)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Some(ref owner) => write!(f, "{}/{}", owner, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.contains('/')
        && !segment.contains(':')
        && !segment.chars().any(char::is_whitespace)
}

/// Label name → destination repository
pub type RepoMapping = BTreeMap<String, RepoTarget>;

/// How trigger labels map to destination repositories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterSpec {
    /// `label:repo`, or `repo` when every event should be routed
    Inline {
        trigger: Option<String>,
        destination: RepoTarget,
    },
    /// Exact label name lookup
    Mapping(RepoMapping),
}

impl RouterSpec {
    /// Parse the inline `router` input
    ///
    /// ```
    /// use gh_issue_router_config::{RepoTarget, RouterSpec};
    ///
    /// let spec = RouterSpec::parse_inline("bug:triage-repo").unwrap();
    /// assert_eq!(
    ///     spec,
    ///     RouterSpec::Inline {
    ///         trigger: Some("bug".to_string()),
    ///         destination: RepoTarget::parse("triage-repo").unwrap(),
    ///     }
    /// );
    /// ```
    pub fn parse_inline(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidRouter {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = raw.split(':').collect();
        match parts.as_slice() {
            [repo] => Ok(RouterSpec::Inline {
                trigger: None,
                destination: RepoTarget::parse(repo)?,
            }),
            [trigger, repo] => {
                if trigger.trim().is_empty() {
                    return Err(invalid("trigger label is empty"));
                }
                if repo.trim().is_empty() {
                    return Err(invalid("destination repository is empty"));
                }
                Ok(RouterSpec::Inline {
                    trigger: Some(trigger.trim().to_string()),
                    destination: RepoTarget::parse(repo)?,
                })
            }
            _ => Err(invalid("expected 'label:repo' or 'repo'")),
        }
    }
}
