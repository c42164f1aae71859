use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, trace};
use vidpack_frame::{Frame, FrameDimensions, FrameError};

use crate::error::{ContainerError, Result};
use crate::layout::parse_frame_index;

/// Reads a directory of `frame_<n>.png` files back into ordered frames.
///
/// Files are ordered by their parsed index, not by name, and other files are
/// ignored. Every image must be 8-bit grayscale. With no dimensions given, the
/// first frame fixes the grid and every later frame must match it.
pub struct FrameReader {
    dir: PathBuf,
    dims: Option<FrameDimensions>,
}

impl FrameReader {
    /// Reader that requires every frame to be exactly `dims`.
    pub fn new(dir: impl Into<PathBuf>, dims: FrameDimensions) -> Self {
        Self {
            dir: dir.into(),
            dims: Some(dims),
        }
    }

    /// Reader that takes its dimensions from the first frame it reads.
    pub fn discover(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dims: None,
        }
    }

    /// Frame files in ascending index order.
    pub fn list(&self) -> Result<Vec<(u32, PathBuf)>> {
        let entries =
            std::fs::read_dir(&self.dir).map_err(|e| ContainerError::io(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ContainerError::io(&self.dir, e))?;
            let name = entry.file_name();
            if let Some(index) = parse_frame_index(&name.to_string_lossy()) {
                files.push((index, entry.path()));
            }
        }
        files.sort_by_key(|(index, _)| *index);
        Ok(files)
    }

    /// Decode one frame file, checking it against the known dimensions.
    pub fn read_frame(&self, index: u32, path: &Path) -> Result<Frame> {
        let image = image::open(path).map_err(|source| ContainerError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        let gray = match image {
            DynamicImage::ImageLuma8(gray) => gray,
            other => {
                return Err(ContainerError::ColorType {
                    path: path.to_path_buf(),
                    color: format!("{:?}", other.color()),
                })
            }
        };

        let (width, height) = gray.dimensions();
        let dims = match self.dims {
            Some(dims) => dims,
            None => FrameDimensions::new(width, height)?,
        };
        if (width, height) != (dims.width, dims.height) {
            debug!(
                path = %path.display(),
                width,
                height,
                expected = %dims,
                "frame dimensions differ"
            );
            return Err(FrameError::MalformedFrame {
                index,
                expected: dims.capacity()?,
                actual: width as usize * height as usize,
            }
            .into());
        }

        trace!(path = %path.display(), index, "read frame");
        Ok(Frame::new(index, dims, gray.into_raw()))
    }

    /// Decode every frame in the directory, in index order.
    ///
    /// A discovering reader adopts the first frame's size.
    pub fn read_all(&mut self) -> Result<Vec<Frame>> {
        let files = self.list()?;
        if files.is_empty() {
            return Err(ContainerError::NoFrames(self.dir.clone()));
        }

        let mut frames = Vec::with_capacity(files.len());
        for (index, path) in &files {
            let frame = self.read_frame(*index, path)?;
            if self.dims.is_none() {
                debug!(dims = %frame.dims, "frame size taken from first frame");
                self.dims = Some(frame.dims);
            }
            frames.push(frame);
        }
        debug!(dir = %self.dir.display(), frames = frames.len(), "read frame sequence");
        Ok(frames)
    }

    /// Dimensions in force, once known.
    pub fn dims(&self) -> Option<FrameDimensions> {
        self.dims
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::frame_file_name;
    use crate::writer::FrameWriter;
    use image::{GrayImage, ImageFormat, RgbImage};

    fn dims(width: u32, height: u32) -> FrameDimensions {
        FrameDimensions::new(width, height).unwrap()
    }

    #[test]
    fn reads_back_written_frames_in_index_order() {
        let dir = tempfile::tempdir().unwrap();
        let d = dims(3, 2);
        let mut writer = FrameWriter::new(dir.path());
        // Written out of order on purpose.
        for index in [10u32, 2, 0] {
            writer
                .write_frame(&Frame::new(index, d, vec![index as u8; 6]))
                .unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let frames = FrameReader::new(dir.path(), d).read_all().unwrap();
        let indices: Vec<u32> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 2, 10]);
        assert_eq!(frames[2].pixels.as_ref(), &[10u8; 6]);
    }

    #[test]
    fn numeric_order_beyond_four_digits() {
        let dir = tempfile::tempdir().unwrap();
        let d = dims(1, 1);
        let mut writer = FrameWriter::new(dir.path());
        writer.write_frame(&Frame::new(10000, d, vec![2u8])).unwrap();
        writer.write_frame(&Frame::new(9999, d, vec![1u8])).unwrap();

        let frames = FrameReader::new(dir.path(), d).read_all().unwrap();
        assert_eq!(frames[0].index, 9999);
        assert_eq!(frames[1].index, 10000);
    }

    #[test]
    fn empty_directory_has_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        let err = FrameReader::new(dir.path(), dims(2, 2)).read_all().unwrap_err();
        assert!(matches!(err, ContainerError::NoFrames(_)));
    }

    #[test]
    fn wrong_size_is_malformed_frame() {
        let dir = tempfile::tempdir().unwrap();
        GrayImage::from_raw(4, 4, vec![0u8; 16])
            .unwrap()
            .save_with_format(dir.path().join(frame_file_name(0)), ImageFormat::Png)
            .unwrap();

        let err = FrameReader::new(dir.path(), dims(2, 2)).read_all().unwrap_err();
        assert!(matches!(
            err,
            ContainerError::Frame(FrameError::MalformedFrame {
                index: 0,
                expected: 4,
                actual: 16
            })
        ));
    }

    #[test]
    fn colour_frames_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_raw(2, 2, vec![9u8; 12])
            .unwrap()
            .save_with_format(dir.path().join(frame_file_name(0)), ImageFormat::Png)
            .unwrap();

        let err = FrameReader::new(dir.path(), dims(2, 2)).read_all().unwrap_err();
        assert!(matches!(err, ContainerError::ColorType { .. }));
    }

    #[test]
    fn discovering_reader_takes_size_from_first_frame() {
        let dir = tempfile::tempdir().unwrap();
        let d = dims(16, 8);
        let mut writer = FrameWriter::new(dir.path());
        writer.write_frame(&Frame::new(0, d, vec![4u8; 128])).unwrap();
        writer.write_frame(&Frame::new(1, d, vec![5u8; 128])).unwrap();

        let mut reader = FrameReader::discover(dir.path());
        assert_eq!(reader.dims(), None);
        let frames = reader.read_all().unwrap();
        assert_eq!(reader.dims(), Some(d));
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.dims == d));
    }

    #[test]
    fn discovering_reader_rejects_a_later_size_change() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = FrameWriter::new(dir.path());
        writer
            .write_frame(&Frame::new(0, dims(4, 2), vec![0u8; 8]))
            .unwrap();
        writer
            .write_frame(&Frame::new(1, dims(2, 2), vec![0u8; 4]))
            .unwrap();

        let err = FrameReader::discover(dir.path()).read_all().unwrap_err();
        assert!(matches!(
            err,
            ContainerError::Frame(FrameError::MalformedFrame {
                index: 1,
                expected: 8,
                actual: 4
            })
        ));
    }
}
