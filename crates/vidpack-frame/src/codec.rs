use bytes::Bytes;

use crate::dims::FrameDimensions;

/// Value used to complete the final frame.
pub const PADDING_BYTE: u8 = 0x00;

/// One grayscale raster: `height` rows of `width` 8-bit pixels.
///
/// Pixel `(row, col)` lives at byte `row * width + col` of `pixels`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position in the sequence. Determines file name and concatenation order.
    pub index: u32,
    /// Pixel grid this frame was laid out on.
    pub dims: FrameDimensions,
    /// Row-major pixel intensities.
    pub pixels: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(index: u32, dims: FrameDimensions, pixels: impl Into<Bytes>) -> Self {
        Self {
            index,
            dims,
            pixels: pixels.into(),
        }
    }

    /// Number of pixel bytes carried by this frame.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Intensity at `(row, col)`, or `None` outside the grid.
    pub fn pixel(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.dims.height || col >= self.dims.width {
            return None;
        }
        let offset = row as usize * self.dims.width as usize + col as usize;
        self.pixels.get(offset).copied()
    }

    /// One full row of pixels.
    pub fn row(&self, row: u32) -> Option<&[u8]> {
        if row >= self.dims.height {
            return None;
        }
        let width = self.dims.width as usize;
        let start = row as usize * width;
        self.pixels.get(start..start + width)
    }
}

/// Result of packing a payload.
#[derive(Debug, Clone)]
pub struct PackedFrames {
    /// Frames in strictly increasing index order, starting at 0.
    pub frames: Vec<Frame>,
    /// Bytes per frame (`width * height`).
    pub frame_capacity: usize,
    /// Zero bytes appended to the final frame.
    pub padding_length: usize,
}

impl PackedFrames {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total bytes carried by the sequence, padding included.
    pub fn total_bytes(&self) -> usize {
        self.frames.len() * self.frame_capacity
    }
}
