use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::config::ContainerConfig;
use crate::error::{ContainerError, Result};
use crate::layout::FRAME_PATTERN;

/// External collaborator that turns a frame directory into a single
/// container file and back.
///
/// Implementations must be bit-for-bit lossless in both directions.
pub trait ContainerTool {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Pack the ordered frames in `frames_dir` into `output`.
    fn frames_to_container(&self, frames_dir: &Path, output: &Path) -> Result<()>;

    /// Extract every frame of `input` into `frames_dir`.
    fn container_to_frames(&self, input: &Path, frames_dir: &Path) -> Result<()>;
}

/// [`ContainerTool`] backed by the `ffmpeg` command-line tool.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
    frame_rate: u32,
    codec: String,
}

impl Ffmpeg {
    pub fn new(binary: impl Into<PathBuf>, frame_rate: u32, codec: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            frame_rate,
            codec: codec.into(),
        }
    }

    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::new(&config.ffmpeg, config.frame_rate, &config.codec)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Arguments for frame directory -> container.
    pub fn encode_args(&self, frames_dir: &Path, output: &Path) -> Vec<OsString> {
        let mut args = common_args();
        args.extend(
            [
                "-framerate".into(),
                self.frame_rate.to_string().into(),
                "-start_number".into(),
                "0".into(),
                "-i".into(),
                frames_dir.join(FRAME_PATTERN).into_os_string(),
                "-c:v".into(),
                self.codec.clone().into(),
                "-pix_fmt".into(),
                "gray".into(),
            ]
            .into_iter(),
        );
        args.push(output.as_os_str().to_owned());
        args
    }

    /// Arguments for container -> frame directory.
    pub fn decode_args(&self, input: &Path, frames_dir: &Path) -> Vec<OsString> {
        let mut args = common_args();
        args.extend(
            [
                "-i".into(),
                input.as_os_str().to_owned(),
                "-vsync".into(),
                "0".into(),
                "-pix_fmt".into(),
                "gray".into(),
                "-start_number".into(),
                "0".into(),
            ]
            .into_iter(),
        );
        args.push(frames_dir.join(FRAME_PATTERN).into_os_string());
        args
    }

    /// Run `ffmpeg -version` and return its first output line.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(source))?;
        if !output.status.success() {
            return Err(ContainerError::ToolFailed {
                tool: self.binary.display().to_string(),
                status: output.status.code(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().to_string())
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        debug!(binary = %self.binary.display(), ?args, "running container tool");
        let status = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| self.spawn_error(source))?;

        if !status.success() {
            return Err(ContainerError::ToolFailed {
                tool: self.binary.display().to_string(),
                status: status.code(),
            });
        }
        Ok(())
    }

    fn spawn_error(&self, source: std::io::Error) -> ContainerError {
        if source.kind() == ErrorKind::NotFound {
            ContainerError::ToolNotFound {
                tool: self.binary.display().to_string(),
                source,
            }
        } else {
            ContainerError::io(&self.binary, source)
        }
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::from_config(&ContainerConfig::default())
    }
}

impl ContainerTool for Ffmpeg {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn frames_to_container(&self, frames_dir: &Path, output: &Path) -> Result<()> {
        self.run(self.encode_args(frames_dir, output))?;
        info!(output = %output.display(), "lossless video created");
        Ok(())
    }

    fn container_to_frames(&self, input: &Path, frames_dir: &Path) -> Result<()> {
        self.run(self.decode_args(input, frames_dir))?;
        info!(dir = %frames_dir.display(), "frames extracted");
        Ok(())
    }
}

fn common_args() -> Vec<OsString> {
    ["-y", "-hide_banner", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect()
}
