use std::path::PathBuf;

/// Errors that can occur while producing or resolving metadata.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// No channel could supply the original length and name.
    #[error("missing metadata: {0}")]
    Missing(String),

    /// A channel was present but its content could not be interpreted.
    #[error("malformed metadata: {0}")]
    Malformed(String),

    /// Reading or writing a side record failed.
    #[error("metadata I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The side record is not valid JSON of the expected shape.
    #[error("side record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MetadataError>;
