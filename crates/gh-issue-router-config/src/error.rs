use thiserror::Error;

/// Problems with the action inputs or the files they point to
///
/// All of these are detected before the first GitHub API call.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Supply either 'router' or 'map_repo_labels_file_path', not both")]
    ConflictingRouter,

    #[error("Invalid router '{value}': {reason}")]
    InvalidRouter { value: String, reason: String },

    #[error("Invalid repository name '{0}', expected 'repo' or 'owner/repo'")]
    InvalidRepository(String),

    #[error("Input '{name}' must be 'true' or 'false', got '{value}'")]
    InvalidBoolean { name: &'static str, value: String },

    #[error("Invalid label '{value}': {reason}")]
    InvalidLabel { value: String, reason: String },

    #[error("Invalid test override '{0}', expected issueId:labelName")]
    InvalidTestOverride(String),

    #[error("Failed to read mapping file {path}: {source}")]
    MappingFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mapping file {path}: {source}")]
    MappingFileYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid mapping file {path}: {reason}")]
    InvalidMapping { path: String, reason: String },
}
