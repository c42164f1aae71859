use std::path::PathBuf;

use vidpack_frame::FrameDimensions;

use crate::error::{ContainerError, Result};

/// Frames per second passed to the container tool.
pub const DEFAULT_FRAME_RATE: u32 = 24;

/// Lossless video codec used for the container.
pub const DEFAULT_CODEC: &str = "ffv1";

/// Container file extension, without the dot.
pub const DEFAULT_CONTAINER_EXT: &str = "mkv";

/// Container tool binary, resolved through `PATH`.
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Settings shared by the encode and decode pipelines.
///
/// `dims` is the grid encode lays payloads out on. Decode reads the grid from
/// the extracted frames unless the request names one. Whether frame files
/// outlive a run is decided by the [`ScratchDir`](crate::ScratchDir) that holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Pixel grid encode lays every frame out on.
    pub dims: FrameDimensions,
    pub frame_rate: u32,
    pub codec: String,
    pub container_ext: String,
    pub ffmpeg: PathBuf,
}

impl ContainerConfig {
    /// Reject values the pipelines cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.dims.capacity()?;
        if self.frame_rate == 0 {
            return Err(ContainerError::InvalidConfig(
                "frame rate must be greater than zero".to_string(),
            ));
        }
        if self.codec.trim().is_empty() {
            return Err(ContainerError::InvalidConfig(
                "codec must not be empty".to_string(),
            ));
        }
        if self.container_ext.is_empty() || self.container_ext.contains(['.', '/', '\\']) {
            return Err(ContainerError::InvalidConfig(format!(
                "container extension {:?} must be a bare extension such as \"mkv\"",
                self.container_ext
            )));
        }
        Ok(())
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            dims: FrameDimensions::default(),
            frame_rate: DEFAULT_FRAME_RATE,
            codec: DEFAULT_CODEC.to_string(),
            container_ext: DEFAULT_CONTAINER_EXT.to_string(),
            ffmpeg: PathBuf::from(DEFAULT_FFMPEG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = ContainerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.frame_rate, 24);
        assert_eq!(cfg.codec, "ffv1");
        assert_eq!(cfg.container_ext, "mkv");
    }

    #[test]
    fn rejects_zero_frame_rate() {
        let cfg = ContainerConfig {
            frame_rate: 0,
            ..ContainerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ContainerError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_dotted_container_ext() {
        let cfg = ContainerConfig {
            container_ext: ".mkv".to_string(),
            ..ContainerConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_dimensions() {
        let cfg = ContainerConfig {
            dims: FrameDimensions {
                width: 0,
                height: 1,
            },
            ..ContainerConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ContainerError::Frame(_))));
    }
}
