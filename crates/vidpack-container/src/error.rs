use std::path::PathBuf;

use vidpack_frame::FrameError;
use vidpack_meta::MetadataError;

/// Errors raised at the filesystem and external-tool boundary.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The file name cannot carry the metadata and no side record was requested.
    #[error(
        "{file} cannot be described by the container name; write a side record to keep it recoverable"
    )]
    NoMetadataChannel { file: String },

    /// Another run holds the lock on this scratch directory.
    #[error("scratch directory {path} is in use by another run (lock {lock})")]
    ScratchBusy { path: PathBuf, lock: PathBuf },

    /// The scratch directory holds files this tool did not create.
    #[error("scratch directory {path} contains unexpected entry {entry}")]
    ScratchNotEmpty { path: PathBuf, entry: String },

    /// Filesystem I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A frame image could not be encoded or decoded.
    #[error("image error on {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    /// A frame image is not single-channel 8-bit.
    #[error("frame {path} has colour type {color}, expected 8-bit grayscale")]
    ColorType { path: PathBuf, color: String },

    /// The container produced no frame files.
    #[error("no frames found in {0}")]
    NoFrames(PathBuf),

    /// The external tool binary could not be started.
    #[error("{tool} could not be started: {source}")]
    ToolNotFound {
        tool: String,
        source: std::io::Error,
    },

    /// The external tool ran and exited unsuccessfully.
    #[error("{tool} failed ({})", describe_status(.status))]
    ToolFailed { tool: String, status: Option<i32> },

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

impl ContainerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ContainerError>;
