//! YAML mapping files
//!
//! Both mapping inputs point at a flat YAML mapping:
//!
//! ```yaml
//! # map_repo_labels_file_path: label -> repository
//! bug: triage
//! docs: octo-org/documentation
//!
//! # labels_file_path: label -> color (null for the default color)
//! triaged: "0e8a16"
//! needs-info:
//! ```

use crate::error::ConfigError;
use crate::label_spec::LabelSpec;
use crate::router_spec::{RepoMapping, RepoTarget};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Load a label → repository mapping
pub fn load_repo_mapping(path: &Path) -> Result<RepoMapping, ConfigError> {
    let mapping = read_mapping(path)?;
    let mut routes = RepoMapping::new();

    for (key, value) in mapping {
        let label = scalar_to_string(&key)
            .ok_or_else(|| invalid(path, "label names must be plain scalars"))?;
        let repo = scalar_to_string(&value)
            .ok_or_else(|| invalid(path, &format!("label '{}' has no repository", label)))?;
        routes.insert(label, RepoTarget::parse(&repo)?);
    }

    log::debug!("Loaded {} routes from {}", routes.len(), path.display());
    Ok(routes)
}

/// Load label → color pairs in file order
pub fn load_label_colors(path: &Path) -> Result<Vec<LabelSpec>, ConfigError> {
    let mapping = read_mapping(path)?;
    let mut labels = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let name = scalar_to_string(&key)
            .ok_or_else(|| invalid(path, "label names must be plain scalars"))?;
        let color = match value {
            Value::Null => None,
            // Unquoted colors made only of digits arrive as integers
            Value::Number(ref n) if n.is_u64() => n.as_u64().map(|n| format!("{:06}", n)),
            ref other => Some(scalar_to_string(other).ok_or_else(|| {
                invalid(path, &format!("label '{}' has a non-scalar color", name))
            })?),
        };
        labels.push(LabelSpec::new(&name, color.as_deref())?);
    }

    log::debug!("Loaded {} labels from {}", labels.len(), path.display());
    Ok(labels)
}

fn read_mapping(path: &Path) -> Result<Mapping, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::MappingFileIo {
        path: path.display().to_string(),
        source,
    })?;

    let value: Value =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::MappingFileYaml {
            path: path.display().to_string(),
            source,
        })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        // An empty file routes nothing
        Value::Null => Ok(Mapping::new()),
        _ => Err(invalid(path, "top level must be a mapping")),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn invalid(path: &Path, reason: &str) -> ConfigError {
    ConfigError::InvalidMapping {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
