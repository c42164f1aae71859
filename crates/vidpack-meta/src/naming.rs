//! Container file name convention.
//!
//! ```text
//! <identifier>-<extension>-<original_length>.<container_ext>
//! report-pdf-700.mkv  ->  identifier "report", extension "pdf", 700 bytes
//! ```
//!
//! The stem is split on its last two `-`, so identifiers may contain dashes.

use std::path::Path;

use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::record::MetadataRecord;

/// Human-readable form of the convention, used in error messages.
pub const FILE_NAME_PATTERN: &str = "<filename>-<extension>-<size>.<container_ext>";

/// Infer a [`MetadataRecord`] from a container path's file name.
pub fn parse_container_file_name(path: &Path, container_ext: &str) -> Result<MetadataRecord> {
    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            MetadataError::Malformed(format!("{} has no UTF-8 file name", path.display()))
        })?;

    let not_in_format = || {
        MetadataError::Malformed(format!(
            "file name {base} is not in the expected format '{}'",
            FILE_NAME_PATTERN.replace("<container_ext>", container_ext)
        ))
    };

    let stem = base
        .strip_suffix(container_ext)
        .and_then(|rest| rest.strip_suffix('.'))
        .ok_or_else(not_in_format)?;

    let mut parts = stem.rsplitn(3, '-');
    let (size, extension, identifier) = match (parts.next(), parts.next(), parts.next()) {
        (Some(size), Some(extension), Some(identifier)) if !identifier.is_empty() => {
            (size, extension, identifier)
        }
        _ => return Err(not_in_format()),
    };

    let unparsable = || {
        MetadataError::Malformed(format!(
            "unable to parse file size from the file name: {base}"
        ))
    };
    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unparsable());
    }
    let original_length: u64 = size.parse().map_err(|_| unparsable())?;

    debug!(identifier, extension, original_length, "inferred metadata from file name");
    Ok(MetadataRecord::new(identifier, extension, original_length))
}
