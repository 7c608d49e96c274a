//! Configuration for gh-issue-router
//!
//! This crate provides:
//! - The default table for optional inputs
//! - Coercion of string-typed action inputs into `ActionConfig`
//! - Router and label specifications
//! - YAML mapping file loading

pub mod action_config;
pub mod defaults;
pub mod error;
pub mod label_spec;
pub mod mapping_file;
pub mod router_spec;

pub use action_config::{input, parse_bool, ActionConfig, TestOverride};
pub use error::ConfigError;
pub use label_spec::{normalize_color, LabelSpec};
pub use mapping_file::{load_label_colors, load_repo_mapping};
pub use router_spec::{RepoMapping, RepoTarget, RouterSpec};
