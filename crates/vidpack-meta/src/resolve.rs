//! Decode-side metadata resolution.
//!
//! Precedence: explicit override, then side record, then container file name.
//! An override wins even when the other channels would also resolve.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{MetadataError, Result};
use crate::naming::{parse_container_file_name, FILE_NAME_PATTERN};
use crate::record::MetadataRecord;
use crate::side_record::SideRecord;

/// Identifier used for payloads recovered through an explicit override.
const OVERRIDE_IDENTIFIER: &str = "file";

/// Length and format supplied directly by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOverride {
    pub original_length: u64,
    pub extension: String,
}

/// Channel that produced the resolved metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    Override,
    SideRecord,
    FileName,
}

impl MetadataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            MetadataSource::Override => "override",
            MetadataSource::SideRecord => "side-record",
            MetadataSource::FileName => "file-name",
        }
    }
}

/// Inputs available to the decoder.
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    /// Container file being decoded.
    pub container: &'a Path,
    /// Expected container extension, without the dot.
    pub container_ext: &'a str,
    pub explicit: Option<MetadataOverride>,
    pub side_record: Option<&'a Path>,
    /// Entry to pick when the side record holds more than one.
    pub name: Option<&'a str>,
}

/// Resolved metadata and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub record: MetadataRecord,
    pub source: MetadataSource,
}

impl Resolved {
    /// File name the decoder should write.
    pub fn output_file_name(&self) -> String {
        self.record.recovered_file_name()
    }
}

/// Determine original length and name for a container.
pub fn resolve(request: &ResolveRequest<'_>) -> Result<Resolved> {
    if let Some(explicit) = &request.explicit {
        let record = MetadataRecord::new(
            OVERRIDE_IDENTIFIER,
            explicit.extension.trim_start_matches('.'),
            explicit.original_length,
        );
        info!(
            file = %record.recovered_file_name(),
            size = record.original_length,
            "using provided size and format"
        );
        return Ok(Resolved {
            record,
            source: MetadataSource::Override,
        });
    }

    if let Some(path) = request.side_record {
        let side = SideRecord::load(path)?;
        let record = match request.name {
            Some(name) => side.get(name).ok_or_else(|| {
                MetadataError::Malformed(format!(
                    "side record {} has no entry named {name}",
                    path.display()
                ))
            })?,
            None => side.single().ok_or_else(|| {
                MetadataError::Malformed(format!(
                    "side record {} holds {} entries; select one by name",
                    path.display(),
                    side.len()
                ))
            })?,
        };
        info!(
            file = %record.recovered_file_name(),
            size = record.original_length,
            "using side record"
        );
        return Ok(Resolved {
            record,
            source: MetadataSource::SideRecord,
        });
    }

    match parse_container_file_name(request.container, request.container_ext) {
        Ok(record) => {
            info!(
                file = %record.recovered_file_name(),
                size = record.original_length,
                "inferred original file"
            );
            Ok(Resolved {
                record,
                source: MetadataSource::FileName,
            })
        }
        Err(err) => {
            debug!(%err, "file name inference failed");
            Err(MetadataError::Missing(format!(
                "{err}; provide --file-size and --file-format, a side record via --meta, \
                 or rename the container to follow '{}'",
                FILE_NAME_PATTERN.replace("<container_ext>", request.container_ext)
            )))
        }
    }
}
