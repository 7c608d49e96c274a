//! Token resolution and client construction
//!
//! Resolves the GitHub token from the explicit input or the environment and
//! builds an `OctocrabClient` pointed at github.com or a GitHub Enterprise host.

use crate::{OctocrabClient, DEFAULT_API_URL};
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::sync::Arc;

/// Resolves the GitHub token for this run
///
/// Tries multiple sources in order:
/// 1. The explicit `token` input
/// 2. `GITHUB_TOKEN`
/// 3. `GH_TOKEN`
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    explicit: Option<String>,
}

impl TokenResolver {
    /// Create a resolver that prefers the given token over the environment
    pub fn new(explicit: Option<String>) -> Self {
        Self {
            explicit: explicit.filter(|token| !token.trim().is_empty()),
        }
    }

    /// Resolve the token, failing when no source provides one
    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(ref token) = self.explicit {
            debug!("Using token from action input");
            return Ok(token.clone());
        }

        for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
            if let Some(token) = lookup(key).filter(|t| !t.trim().is_empty()) {
                debug!("Using token from {}", key);
                return Ok(token);
            }
        }

        Err(anyhow::anyhow!(
            "No GitHub token found. Set the 'token' input or GITHUB_TOKEN"
        ))
    }
}

/// Build a client for the given API base url
///
/// # Arguments
///
/// * `token` - Personal access token or app installation token
/// * `api_url` - REST base url; `None` or the public API url means github.com
pub fn connect(token: String, api_url: Option<&str>) -> Result<OctocrabClient> {
    let mut builder = Octocrab::builder().personal_token(token);

    let base_url = api_url
        .map(|url| url.trim_end_matches('/'))
        .filter(|url| !url.is_empty() && *url != DEFAULT_API_URL);
    if let Some(url) = base_url {
        builder = builder.base_uri(url).context("Failed to set base URI")?;
    }

    let octocrab = builder.build().context("Failed to build Octocrab client")?;
    info!(
        "GitHub client created for {}",
        base_url.unwrap_or(DEFAULT_API_URL)
    );

    Ok(OctocrabClient::new(Arc::new(octocrab)))
}
