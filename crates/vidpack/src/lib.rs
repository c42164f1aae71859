//! Carry arbitrary files through lossless video containers.
//!
//! vidpack lays a file out one byte per pixel across fixed-size grayscale
//! frames, hands the frames to a lossless video encoder, and reverses the
//! process bit for bit.
//!
//! # Crate Structure
//!
//! - [`frame`]: The pure codec: packing bytes into frames and back
//! - [`meta`]: Original length and name records, container naming
//! - [`container`]: Scratch directories, PNG frames, ffmpeg, full pipelines

/// Re-export frame codec types.
pub mod frame {
    pub use vidpack_frame::*;
}

/// Re-export metadata types.
pub mod meta {
    pub use vidpack_meta::*;
}

/// Re-export container boundary types.
pub mod container {
    pub use vidpack_container::*;
}
