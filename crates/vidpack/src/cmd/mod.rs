use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use vidpack_container::{
    ContainerConfig, ScratchDir, DEFAULT_CODEC, DEFAULT_CONTAINER_EXT, DEFAULT_FFMPEG,
    DEFAULT_FRAME_RATE,
};
use vidpack_frame::{FrameDimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use vidpack_meta::{MetadataOverride, ResolveRequest};

use crate::exit::{container_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod doctor;
pub mod encode;
pub mod envinfo;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pack a file into a lossless video container.
    Encode(EncodeArgs),
    /// Recover the original file from a container.
    Decode(DecodeArgs),
    /// Show how a container's metadata resolves, without decoding it.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run local environment health checks.
    Doctor(DoctorArgs),
    /// Print build and environment diagnostics.
    Envinfo(EnvinfoArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
        Command::Envinfo(args) => envinfo::run(args, format),
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FrameArgs {
    /// Frame width in pixels. Encode default: 640. Decode default: read from the frames.
    #[arg(long)]
    pub width: Option<u32>,
    /// Frame height in pixels. Encode default: 480. Decode default: read from the frames.
    #[arg(long)]
    pub height: Option<u32>,
}

impl FrameArgs {
    /// Grid named on the command line, if any. A missing side takes its default.
    pub fn dims(&self) -> Option<FrameDimensions> {
        if self.width.is_none() && self.height.is_none() {
            return None;
        }
        Some(FrameDimensions {
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
        })
    }

    pub fn dims_or_default(&self) -> FrameDimensions {
        self.dims().unwrap_or_default()
    }
}

#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Frames per second written into the container.
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    pub frame_rate: u32,
    /// Lossless video codec passed to ffmpeg.
    #[arg(long, default_value = DEFAULT_CODEC)]
    pub codec: String,
    /// Container file extension.
    #[arg(long, default_value = DEFAULT_CONTAINER_EXT)]
    pub container_ext: String,
    /// ffmpeg binary to run.
    #[arg(long, env = "VIDPACK_FFMPEG", default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ScratchArgs {
    /// Directory for intermediate frame images. Default: a fresh temporary directory.
    #[arg(long, env = "VIDPACK_SCRATCH_DIR", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,
    /// Keep the frame images after the run.
    #[arg(long, alias = "save-artifacts")]
    pub keep_frames: bool,
}

impl ScratchArgs {
    pub fn acquire(&self) -> CliResult<ScratchDir> {
        let scratch = match &self.scratch_dir {
            Some(path) => ScratchDir::acquire(path, self.keep_frames),
            None => ScratchDir::temporary(self.keep_frames),
        };
        scratch.map_err(|err| container_error("scratch directory unavailable", err))
    }
}

#[derive(Args, Debug, Clone)]
pub struct MetadataArgs {
    /// Original file size in bytes. Overrides every other metadata source.
    #[arg(long, value_name = "BYTES", requires = "file_format")]
    pub file_size: Option<u64>,
    /// Original file extension, without the dot.
    #[arg(long, value_name = "EXT", requires = "file_size")]
    pub file_format: Option<String>,
    /// JSON side record written at encode time.
    #[arg(long, value_name = "FILE")]
    pub meta: Option<PathBuf>,
    /// Entry to pick from a side record holding several files.
    #[arg(long, value_name = "NAME", requires = "meta")]
    pub name: Option<String>,
}

impl MetadataArgs {
    pub fn request<'a>(&'a self, container: &'a Path, container_ext: &'a str) -> ResolveRequest<'a> {
        let explicit = match (self.file_size, &self.file_format) {
            (Some(original_length), Some(extension)) => Some(MetadataOverride {
                original_length,
                extension: extension.trim_start_matches('.').to_string(),
            }),
            _ => None,
        };
        ResolveRequest {
            container,
            container_ext,
            explicit,
            side_record: self.meta.as_deref(),
            name: self.name.as_deref(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to pack.
    pub input: PathBuf,
    /// Directory the container is written to.
    #[arg(long, default_value = ".", alias = "output-path-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
    /// Side record path. Default: meta.json in the output directory.
    #[arg(long, value_name = "FILE", conflicts_with = "no_meta")]
    pub meta_out: Option<PathBuf>,
    /// Do not write a side record.
    #[arg(long)]
    pub no_meta: bool,
    #[command(flatten)]
    pub scratch: ScratchArgs,
    #[command(flatten)]
    pub frame: FrameArgs,
    #[command(flatten)]
    pub tool: ToolArgs,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Container file to decode.
    pub container: PathBuf,
    /// Directory the recovered file is written to.
    #[arg(long, default_value = ".", alias = "output-path-dir", value_name = "DIR")]
    pub output_dir: PathBuf,
    #[command(flatten)]
    pub metadata: MetadataArgs,
    #[command(flatten)]
    pub scratch: ScratchArgs,
    #[command(flatten)]
    pub frame: FrameArgs,
    #[command(flatten)]
    pub tool: ToolArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Container file to inspect. It does not need to exist.
    pub container: PathBuf,
    /// Container file extension.
    #[arg(long, default_value = DEFAULT_CONTAINER_EXT)]
    pub container_ext: String,
    #[command(flatten)]
    pub metadata: MetadataArgs,
    #[command(flatten)]
    pub frame: FrameArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show build details.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// ffmpeg binary to run.
    #[arg(long, env = "VIDPACK_FFMPEG", default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}

#[derive(Args, Debug)]
pub struct EnvinfoArgs {}

pub fn container_config(frame: &FrameArgs, tool: &ToolArgs) -> ContainerConfig {
    ContainerConfig {
        dims: frame.dims_or_default(),
        frame_rate: tool.frame_rate,
        codec: tool.codec.clone(),
        container_ext: tool.container_ext.trim_start_matches('.').to_string(),
        ffmpeg: tool.ffmpeg.clone(),
    }
}
