use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use tracing::trace;
use vidpack_frame::{Frame, FrameError};

use crate::error::{ContainerError, Result};
use crate::layout::frame_file_name;

/// Writes frames into a directory as 8-bit grayscale PNG files.
pub struct FrameWriter {
    dir: PathBuf,
    written: usize,
}

impl FrameWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Write one frame as `frame_<index>.png` and return its path.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<PathBuf> {
        let path = self.dir.join(frame_file_name(frame.index));
        let image = GrayImage::from_raw(frame.dims.width, frame.dims.height, frame.pixels.to_vec())
            .ok_or_else(|| FrameError::MalformedFrame {
                index: frame.index,
                expected: frame.dims.capacity().unwrap_or(0),
                actual: frame.pixels.len(),
            })?;

        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ContainerError::Image {
                path: path.clone(),
                source,
            })?;

        self.written += 1;
        trace!(path = %path.display(), index = frame.index, "wrote frame");
        Ok(path)
    }

    /// Write every frame in order. Returns the number written.
    pub fn write_all(&mut self, frames: &[Frame]) -> Result<usize> {
        for frame in frames {
            self.write_frame(frame)?;
        }
        Ok(frames.len())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidpack_frame::FrameDimensions;

    #[test]
    fn writes_named_png() {
        let dir = tempfile::tempdir().unwrap();
        let dims = FrameDimensions::new(4, 2).unwrap();
        let mut writer = FrameWriter::new(dir.path());

        let path = writer
            .write_frame(&Frame::new(7, dims, vec![0u8, 1, 2, 3, 252, 253, 254, 255]))
            .unwrap();

        assert_eq!(path.file_name().unwrap(), "frame_0007.png");
        let decoded = image::open(&path).unwrap().into_luma8();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.into_raw(), vec![0, 1, 2, 3, 252, 253, 254, 255]);
        assert_eq!(writer.written(), 1);
    }

    #[test]
    fn short_frame_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let dims = FrameDimensions::new(4, 4).unwrap();
        let mut writer = FrameWriter::new(dir.path());

        let err = writer.write_frame(&Frame::new(0, dims, vec![1u8; 3])).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::Frame(FrameError::MalformedFrame {
                expected: 16,
                actual: 3,
                ..
            })
        ));
        assert_eq!(writer.written(), 0);
    }
}
