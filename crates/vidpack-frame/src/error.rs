/// Errors that can occur while packing or unpacking frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Width or height is zero, or the frame capacity overflows `usize`.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A frame does not hold exactly one frame capacity worth of pixels.
    #[error("malformed frame {index}: expected {expected} bytes, got {actual}")]
    MalformedFrame {
        index: u32,
        expected: usize,
        actual: usize,
    },

    /// The frame sequence holds fewer bytes than the recorded original length.
    #[error("truncated input: {requested} bytes requested, only {available} available")]
    TruncatedInput { requested: usize, available: usize },

    /// Frame indices are not strictly increasing.
    #[error("frame {index} is out of order (follows frame {previous})")]
    OutOfOrder { previous: u32, index: u32 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
