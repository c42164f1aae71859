use std::fmt;
use std::io;

use vidpack_container::ContainerError;
use vidpack_frame::FrameError;
use vidpack_meta::MetadataError;

// Process exit codes. USAGE matches sysexits EX_USAGE.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TOOL_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound | io::ErrorKind::AlreadyExists => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    let code = match err {
        FrameError::InvalidDimensions { .. } => USAGE,
        FrameError::MalformedFrame { .. }
        | FrameError::TruncatedInput { .. }
        | FrameError::OutOfOrder { .. } => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn metadata_error(context: &str, err: MetadataError) -> CliError {
    match err {
        MetadataError::Io { path, source } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        MetadataError::Missing(_) => CliError::new(USAGE, format!("{context}: {err}")),
        MetadataError::Malformed(_) | MetadataError::Json(_) => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn container_error(context: &str, err: ContainerError) -> CliError {
    match err {
        ContainerError::Frame(err) => frame_error(context, err),
        ContainerError::Metadata(err) => metadata_error(context, err),
        ContainerError::Io { path, source } => {
            io_error(&format!("{context}: {}", path.display()), source)
        }
        ContainerError::ToolNotFound { .. } | ContainerError::ToolFailed { .. } => {
            CliError::new(TOOL_ERROR, format!("{context}: {err}"))
        }
        ContainerError::Image { .. }
        | ContainerError::ColorType { .. }
        | ContainerError::NoFrames(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        ContainerError::InvalidConfig(_)
        | ContainerError::ScratchNotEmpty { .. }
        | ContainerError::NoMetadataChannel { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        ContainerError::ScratchBusy { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}
