use thiserror::Error;

/// Errors raised at the runner boundary
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Invalid repository slug '{0}', expected owner/repo")]
    InvalidRepositorySlug(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event payload: {0}")]
    EventPayload(#[from] serde_json::Error),
}
