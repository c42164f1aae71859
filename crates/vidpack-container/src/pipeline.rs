//! End-to-end encode and decode runs.
//!
//! Each run reads or writes whole files, drives the pure codec, and hands the
//! scratch directory to a [`ContainerTool`]. There is no partial success:
//! the first error ends the run.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use vidpack_frame::{pack, unpack, FrameDimensions, FrameError};
use vidpack_meta::{MetadataRecord, MetadataSource, Resolved, SideRecord};

use crate::config::ContainerConfig;
use crate::error::{ContainerError, Result};
use crate::reader::FrameReader;
use crate::scratch::ScratchDir;
use crate::tool::ContainerTool;
use crate::writer::FrameWriter;

/// Inputs of one encode run.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub input: &'a Path,
    /// Directory the container file is written to.
    pub output_dir: &'a Path,
    /// Where to write the JSON side record, if anywhere.
    pub side_record: Option<&'a Path>,
}

/// Outcome of an encode run.
#[derive(Debug, Clone)]
pub struct EncodeReport {
    pub record: MetadataRecord,
    pub container: PathBuf,
    pub side_record: Option<PathBuf>,
    pub dims: FrameDimensions,
    pub frames: usize,
    pub frame_capacity: usize,
    pub padding_length: usize,
    /// Scratch directory holding the frames, when they were kept.
    pub kept_frames: Option<PathBuf>,
}

/// Convert `input` into a container named by the file name convention.
pub fn encode_file<T: ContainerTool>(
    request: &EncodeRequest<'_>,
    scratch: &ScratchDir,
    config: &ContainerConfig,
    tool: &T,
) -> Result<EncodeReport> {
    config.validate()?;

    let payload =
        std::fs::read(request.input).map_err(|e| ContainerError::io(request.input, e))?;
    let record = MetadataRecord::from_path(request.input, payload.len() as u64).ok_or_else(|| {
        ContainerError::io(
            request.input,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no UTF-8 file name"),
        )
    })?;

    let container_name = match (
        record.container_file_name(&config.container_ext),
        request.side_record,
    ) {
        (Some(name), _) => name,
        (None, Some(_)) => {
            warn!(
                file = %record.file_name(),
                "extension cannot be encoded in the container name; decode will need the side record"
            );
            format!("{}.{}", record.identifier, config.container_ext)
        }
        (None, None) => {
            return Err(ContainerError::NoMetadataChannel {
                file: record.file_name(),
            })
        }
    };

    let packed = pack(&payload, config.dims)?;
    drop(payload);

    let mut writer = FrameWriter::new(scratch.path());
    writer.write_all(&packed.frames)?;
    info!(
        dir = %scratch.path().display(),
        frames = writer.written(),
        "frames saved"
    );

    std::fs::create_dir_all(request.output_dir)
        .map_err(|e| ContainerError::io(request.output_dir, e))?;
    let container = request.output_dir.join(container_name);

    tool.frames_to_container(scratch.path(), &container)?;

    if let Some(path) = request.side_record {
        SideRecord::for_record(&record).save(path)?;
        info!(path = %path.display(), "metadata saved");
    }

    Ok(EncodeReport {
        container,
        side_record: request.side_record.map(Path::to_path_buf),
        dims: config.dims,
        frames: packed.frames.len(),
        frame_capacity: packed.frame_capacity,
        padding_length: packed.padding_length,
        kept_frames: scratch.keeps_frames().then(|| scratch.path().to_path_buf()),
        record,
    })
}

/// Inputs of one decode run.
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest<'a> {
    pub container: &'a Path,
    pub metadata: &'a Resolved,
    /// Frame grid to enforce. Taken from the first extracted frame when absent.
    pub dims: Option<FrameDimensions>,
    /// Directory the recovered file is written to.
    pub output_dir: &'a Path,
}

/// Outcome of a decode run.
#[derive(Debug, Clone)]
pub struct DecodeReport {
    pub output: PathBuf,
    pub original_length: u64,
    pub source: MetadataSource,
    pub dims: FrameDimensions,
    pub frames: usize,
    pub kept_frames: Option<PathBuf>,
}

/// Reconstruct the original file from a container.
pub fn decode_file<T: ContainerTool>(
    request: &DecodeRequest<'_>,
    scratch: &ScratchDir,
    config: &ContainerConfig,
    tool: &T,
) -> Result<DecodeReport> {
    config.validate()?;

    if !request.container.is_file() {
        return Err(ContainerError::io(
            request.container,
            std::io::Error::new(std::io::ErrorKind::NotFound, "container file not found"),
        ));
    }

    tool.container_to_frames(request.container, scratch.path())?;

    let mut reader = match request.dims {
        Some(dims) => FrameReader::new(scratch.path(), dims),
        None => FrameReader::discover(scratch.path()),
    };
    let frames = reader.read_all()?;
    let dims = reader
        .dims()
        .ok_or_else(|| ContainerError::NoFrames(scratch.path().to_path_buf()))?;

    let record = &request.metadata.record;
    let original_length = usize::try_from(record.original_length).map_err(|_| {
        FrameError::TruncatedInput {
            requested: usize::MAX,
            available: frames.len().saturating_mul(dims.capacity().unwrap_or(0)),
        }
    })?;
    let payload = unpack(&frames, dims, original_length)?;

    std::fs::create_dir_all(request.output_dir)
        .map_err(|e| ContainerError::io(request.output_dir, e))?;
    let output = request.output_dir.join(request.metadata.output_file_name());
    std::fs::write(&output, &payload).map_err(|e| ContainerError::io(&output, e))?;
    info!(output = %output.display(), bytes = payload.len(), "recovered file saved");

    Ok(DecodeReport {
        output,
        original_length: record.original_length,
        source: request.metadata.source,
        dims,
        frames: frames.len(),
        kept_frames: scratch.keeps_frames().then(|| scratch.path().to_path_buf()),
    })
}
