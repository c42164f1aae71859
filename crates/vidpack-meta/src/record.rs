use std::path::Path;

/// Identity and authoritative length of one encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    /// File name without its final extension.
    pub identifier: String,
    /// Final extension without the leading dot. May be empty.
    pub extension: String,
    /// Payload length in bytes; trims the padding on decode.
    pub original_length: u64,
}

impl MetadataRecord {
    pub fn new(
        identifier: impl Into<String>,
        extension: impl Into<String>,
        original_length: u64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            extension: extension.into(),
            original_length,
        }
    }

    /// Split a file name at its last `.`.
    ///
    /// A leading dot is part of the identifier (`.bashrc` has no extension).
    pub fn from_file_name(file_name: &str, original_length: u64) -> Self {
        match file_name.rfind('.') {
            Some(pos) if pos > 0 => Self::new(
                &file_name[..pos],
                &file_name[pos + 1..],
                original_length,
            ),
            _ => Self::new(file_name, "", original_length),
        }
    }

    /// Record for the file at `path`. Returns `None` if the path has no
    /// UTF-8 file name.
    pub fn from_path(path: &Path, original_length: u64) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        Some(Self::from_file_name(name, original_length))
    }

    /// `<identifier>.<extension>`, or the bare identifier.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.identifier.clone()
        } else {
            format!("{}.{}", self.identifier, self.extension)
        }
    }

    /// Name the decoder writes the reconstructed payload under.
    pub fn recovered_file_name(&self) -> String {
        format!("recovered_{}", self.file_name())
    }

    /// `<identifier>-<extension>-<length>.<container_ext>`.
    ///
    /// Returns `None` when the extension contains `-`, since the name could
    /// not be split back unambiguously.
    pub fn container_file_name(&self, container_ext: &str) -> Option<String> {
        if self.extension.contains('-') || self.identifier.is_empty() {
            return None;
        }
        Some(format!(
            "{}-{}-{}.{}",
            self.identifier, self.extension, self.original_length, container_ext
        ))
    }
}
