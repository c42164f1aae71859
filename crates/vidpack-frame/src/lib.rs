//! Lossless byte-stream to grayscale frame-sequence codec.
//!
//! This is the core of vidpack. A payload is laid out one byte per pixel:
//! - Every frame is a fixed `width x height` single-channel 8-bit raster
//! - Bytes fill each frame row-major, frames are filled in index order
//! - The final frame is completed with zero padding
//!
//! The original length is not stored in the pixels. It travels out of band
//! and is required again to trim the padding on decode.

pub mod codec;
pub mod dims;
pub mod error;
pub mod pack;
pub mod unpack;

pub use codec::{Frame, PackedFrames, PADDING_BYTE};
pub use dims::{FrameDimensions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{FrameError, Result};
pub use pack::{frame_count, pack, padding_length};
pub use unpack::unpack;
