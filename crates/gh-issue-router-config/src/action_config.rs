//! Action configuration
//!
//! String-typed action inputs are validated and coerced here, once, into
//! `ActionConfig`. Nothing downstream reads raw inputs.

use crate::defaults;
use crate::error::ConfigError;
use crate::label_spec::{dedup_labels, LabelSpec};
use crate::mapping_file::{load_label_colors, load_repo_mapping};
use crate::router_spec::RouterSpec;
use gh_actions_runtime::InputSource;
use std::path::Path;

/// Input names as declared in action.yml
pub mod input {
    pub const ROUTER: &str = "router";
    /// Older single-destination spelling of `router`
    pub const DESTINATION_REPO: &str = "destination_repo";
    pub const TOKEN: &str = "token";
    pub const GITHUB_TOKEN: &str = "github_token";
    pub const CREATE_STUB: &str = "create_stub";
    pub const APPLY_LABEL: &str = "apply_label";
    pub const MAP_REPO_LABELS_FILE_PATH: &str = "map_repo_labels_file_path";
    pub const LABELS_FILE_PATH: &str = "labels_file_path";
    pub const ALLOW_PRIVATE_PUBLIC_TRANSFER: &str = "allow_private_public_transfer";
    pub const CREATE_LABELS_IF_MISSING: &str = "create_labels_if_missing";
    pub const ENABLE_CUSTOM_LABEL_ROUTING: &str = "enable_custom_label_routing";
    pub const TEST: &str = "test";
    pub const DEBUG: &str = "debug";
}

/// `test` input: act on a given issue as if a label had been added
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOverride {
    /// Node id of the issue
    pub issue_id: String,
    pub label_name: String,
}

impl TestOverride {
    /// Parse `issueId:labelName`; the label may itself contain ':'
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.split_once(':') {
            Some((issue_id, label_name))
                if !issue_id.trim().is_empty() && !label_name.trim().is_empty() =>
            {
                Ok(Self {
                    issue_id: issue_id.trim().to_string(),
                    label_name: label_name.trim().to_string(),
                })
            }
            _ => Err(ConfigError::InvalidTestOverride(raw.to_string())),
        }
    }
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub router: RouterSpec,

    /// Explicit token; the environment is consulted when absent
    pub token: Option<String>,

    pub create_stub: bool,

    /// Labels to ensure and apply after the transfer, without duplicates
    pub labels: Vec<LabelSpec>,

    /// Allow the bridged private → public protocol
    pub allow_private_public_transfer: bool,

    pub create_labels_if_missing: bool,

    pub enable_custom_label_routing: bool,

    pub test: Option<TestOverride>,

    pub debug: bool,
}

impl ActionConfig {
    /// Build the configuration from raw inputs
    ///
    /// Mapping files are read here so that a broken file fails the run
    /// before any API call is made.
    pub fn from_inputs(inputs: &impl InputSource) -> Result<Self, ConfigError> {
        let router = Self::router_from_inputs(inputs)?;

        let mut labels = Vec::new();
        if let Some(raw) = inputs.get(input::APPLY_LABEL) {
            labels.push(LabelSpec::parse(&raw)?);
        }
        if let Some(path) = inputs.get(input::LABELS_FILE_PATH) {
            labels.extend(load_label_colors(Path::new(&path))?);
        }

        let test = inputs
            .get(input::TEST)
            .map(|raw| TestOverride::parse(&raw))
            .transpose()?;

        Ok(Self {
            router,
            token: inputs
                .get(input::TOKEN)
                .or_else(|| inputs.get(input::GITHUB_TOKEN)),
            create_stub: parse_bool(inputs, input::CREATE_STUB, defaults::CREATE_STUB)?,
            labels: dedup_labels(labels),
            allow_private_public_transfer: parse_bool(
                inputs,
                input::ALLOW_PRIVATE_PUBLIC_TRANSFER,
                defaults::ALLOW_PRIVATE_PUBLIC_TRANSFER,
            )?,
            create_labels_if_missing: parse_bool(
                inputs,
                input::CREATE_LABELS_IF_MISSING,
                defaults::CREATE_LABELS_IF_MISSING,
            )?,
            enable_custom_label_routing: parse_bool(
                inputs,
                input::ENABLE_CUSTOM_LABEL_ROUTING,
                defaults::ENABLE_CUSTOM_LABEL_ROUTING,
            )?,
            test,
            debug: parse_bool(inputs, input::DEBUG, defaults::DEBUG)?,
        })
    }

    fn router_from_inputs(inputs: &impl InputSource) -> Result<RouterSpec, ConfigError> {
        let inline = inputs
            .get(input::ROUTER)
            .or_else(|| inputs.get(input::DESTINATION_REPO));
        let mapping_path = inputs.get(input::MAP_REPO_LABELS_FILE_PATH);

        match (inline, mapping_path) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingRouter),
            (None, None) => Err(ConfigError::MissingInput(input::ROUTER)),
            (Some(raw), None) => RouterSpec::parse_inline(&raw),
            (None, Some(path)) => Ok(RouterSpec::Mapping(load_repo_mapping(Path::new(&path))?)),
        }
    }
}

/// Coerce a boolean input
///
/// Only `true`/`false` (any case) are accepted; a missing input takes the default.
pub fn parse_bool(
    inputs: &impl InputSource,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match inputs.get(name) {
        None => Ok(default),
        Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
        Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
        Some(value) => Err(ConfigError::InvalidBoolean { name, value }),
    }
}
