//! Step outputs
//!
//! Outputs are appended to the file named by `$GITHUB_OUTPUT`. Values that
//! span several lines use the heredoc form `name<<DELIMITER`.

use crate::error::RuntimeError;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Destination for step outputs
pub trait OutputSink {
    /// Publish `value` under `name`
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RuntimeError>;
}

/// Outputs written to the runner's output file
#[derive(Debug, Clone, Default)]
pub struct FileOutputs {
    path: Option<PathBuf>,
}

impl FileOutputs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Use `$GITHUB_OUTPUT`, or only log outputs when it is not set
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from))
    }
}

impl OutputSink for FileOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RuntimeError> {
        let Some(ref path) = self.path else {
            log::info!("Output {}={}", name, value);
            return Ok(());
        };

        log::debug!("Setting output {}", name);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| RuntimeError::Io {
                path: path.display().to_string(),
                source,
            })?;

        file.write_all(format_output(name, value).as_bytes())
            .map_err(|source| RuntimeError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}

/// Outputs kept in memory, in name order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedOutputs {
    values: BTreeMap<String, String>,
}

impl RecordedOutputs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl OutputSink for RecordedOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), RuntimeError> {
        self.values.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

/// Render one output entry in the output file syntax
fn format_output(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{}={}\n", name, value);
    }

    let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}
