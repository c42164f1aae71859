use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MetadataError, Result};
use crate::record::MetadataRecord;

/// File name the encoder uses when no side record path is given.
pub const DEFAULT_SIDE_RECORD_NAME: &str = "meta.json";

/// Maximum bytes read from a side record file.
pub const MAX_SIDE_RECORD_SIZE: u64 = 64 * 1024;

/// JSON mapping of original file name to original byte length.
///
/// ```json
/// { "report.pdf": 700 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SideRecord {
    entries: BTreeMap<String, u64>,
}

impl SideRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side record holding a single payload.
    pub fn for_record(record: &MetadataRecord) -> Self {
        let mut side = Self::new();
        side.insert(record);
        side
    }

    pub fn insert(&mut self, record: &MetadataRecord) {
        self.entries
            .insert(record.file_name(), record.original_length);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its file name key.
    pub fn get(&self, file_name: &str) -> Option<MetadataRecord> {
        self.entries
            .get(file_name)
            .map(|&len| MetadataRecord::from_file_name(file_name, len))
    }

    /// The only entry, if the record holds exactly one.
    pub fn single(&self) -> Option<MetadataRecord> {
        let mut iter = self.entries.iter();
        match (iter.next(), iter.next()) {
            (Some((name, &len)), None) => Some(MetadataRecord::from_file_name(name, len)),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Load a side record, refusing files larger than [`MAX_SIDE_RECORD_SIZE`].
    pub fn load(path: &Path) -> Result<Self> {
        let io_err = |source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = std::fs::File::open(path).map_err(io_err)?;
        let mut raw = String::new();
        file.take(MAX_SIDE_RECORD_SIZE + 1)
            .read_to_string(&mut raw)
            .map_err(io_err)?;
        if raw.len() as u64 > MAX_SIDE_RECORD_SIZE {
            return Err(MetadataError::Malformed(format!(
                "side record {} exceeds {MAX_SIDE_RECORD_SIZE} bytes",
                path.display()
            )));
        }

        let record: Self = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), entries = record.len(), "loaded side record");
        Ok(record)
    }

    /// Write the side record as JSON, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), entries = self.len(), "wrote side record");
        Ok(())
    }
}
