//! Frame geometry shared by the packer and the unpacker.
//!
//! Both directions must agree on the dimensions. A mismatch does not fail
//! loudly on its own; it shifts every byte after the first row.

use crate::error::{FrameError, Result};

/// Default frame width in pixels.
pub const DEFAULT_WIDTH: u32 = 640;

/// Default frame height in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;

/// Fixed pixel grid used for every frame of one encode/decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    /// Validate and build a dimension pair.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let dims = Self { width, height };
        dims.capacity()?;
        Ok(dims)
    }

    /// Bytes (pixels) held by one frame: `width * height`.
    pub fn capacity(&self) -> Result<usize> {
        let invalid = FrameError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };
        if self.width == 0 || self.height == 0 {
            return Err(invalid);
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(invalid)
    }
}

impl Default for FrameDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl std::fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_vga() {
        let dims = FrameDimensions::default();
        assert_eq!((dims.width, dims.height), (640, 480));
        assert_eq!(dims.capacity().unwrap(), 307_200);
    }

    #[test]
    fn rejects_zero_width_or_height() {
        assert_eq!(
            FrameDimensions::new(0, 480),
            Err(FrameError::InvalidDimensions {
                width: 0,
                height: 480
            })
        );
        assert!(matches!(
            FrameDimensions::new(640, 0),
            Err(FrameError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn capacity_revalidates_hand_built_pairs() {
        let dims = FrameDimensions {
            width: 0,
            height: 9,
        };
        assert!(matches!(
            dims.capacity(),
            Err(FrameError::InvalidDimensions { width: 0, height: 9 })
        ));
    }

    #[test]
    fn display_uses_width_x_height() {
        let dims = FrameDimensions::new(16, 9).unwrap();
        assert_eq!(dims.to_string(), "16x9");
    }
}
