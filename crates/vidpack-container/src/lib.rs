//! Boundary adapters around the vidpack frame codec.
//!
//! The codec itself is pure. This crate owns everything that touches disk or
//! spawns processes:
//! - [`ScratchDir`]: exclusive, scoped ownership of a working directory
//! - [`FrameWriter`] / [`FrameReader`]: frames as 8-bit grayscale PNG files
//! - [`ContainerTool`]: frame directory to container file and back ([`Ffmpeg`])
//! - [`encode_file`] / [`decode_file`]: the full pipelines

pub mod config;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod reader;
pub mod scratch;
pub mod tool;
pub mod writer;

pub use config::{
    ContainerConfig, DEFAULT_CODEC, DEFAULT_CONTAINER_EXT, DEFAULT_FFMPEG, DEFAULT_FRAME_RATE,
};
pub use error::{ContainerError, Result};
pub use layout::{frame_file_name, parse_frame_index, FRAME_EXTENSION, FRAME_PATTERN};
pub use pipeline::{
    decode_file, encode_file, DecodeReport, DecodeRequest, EncodeReport, EncodeRequest,
};
pub use reader::FrameReader;
pub use scratch::{lock_path, ScratchDir};
pub use tool::{ContainerTool, Ffmpeg};
pub use writer::FrameWriter;
