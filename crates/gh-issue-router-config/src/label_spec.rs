//! Labels applied after the transfer

use crate::defaults;
use crate::error::ConfigError;

/// A label that must exist on the destination and be put on the issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    pub name: String,
    /// Six hex digits, lower case, no '#'
    pub color: String,
}

impl LabelSpec {
    /// Build a label, validating the color or using the default one
    pub fn new(name: &str, color: Option<&str>) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::InvalidLabel {
                value: name.to_string(),
                reason: "label name is empty".to_string(),
            });
        }

        let color = match color.map(str::trim).filter(|c| !c.is_empty()) {
            Some(raw) => normalize_color(raw).ok_or_else(|| ConfigError::InvalidLabel {
                value: format!("{}:{}", name, raw),
                reason: "color must be six hex digits".to_string(),
            })?,
            None => defaults::LABEL_COLOR.to_string(),
        };

        Ok(Self {
            name: name.to_string(),
            color,
        })
    }

    /// Parse the `apply_label` input: `name` or `name:color`
    ///
    /// The color is taken after the last ':' so label names may contain one.
    /// A suffix that looks like a mistyped color is rejected instead of
    /// becoming part of the name.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.rsplit_once(':') {
            Some((name, color)) if normalize_color(color.trim()).is_some() => {
                Self::new(name, Some(color))
            }
            Some((name, "")) => Self::new(name, None),
            Some((_, color)) if looks_like_color(color.trim()) => {
                Err(ConfigError::InvalidLabel {
                    value: raw.to_string(),
                    reason: "color must be six hex digits".to_string(),
                })
            }
            _ => Self::new(raw, None),
        }
    }
}

/// Lower-cased six digit hex color with an optional leading '#'
pub fn normalize_color(raw: &str) -> Option<String> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())).then(|| hex.to_lowercase())
}

/// '#'-prefixed, or five to seven hex digits with at least one digit
///
/// Words like `cafe` or numbers like `2024` stay part of the label name.
fn looks_like_color(raw: &str) -> bool {
    raw.starts_with('#')
        || ((5..=7).contains(&raw.len())
            && raw.chars().all(|c| c.is_ascii_hexdigit())
            && raw.chars().any(|c| c.is_ascii_digit()))
}

/// Drop later duplicates by name, keeping the first occurrence
///
/// Names compare case-insensitively, as GitHub treats labels.
pub fn dedup_labels(labels: Vec<LabelSpec>) -> Vec<LabelSpec> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.name.to_lowercase()))
        .collect()
}
