//! Out-of-band metadata for vidpack containers.
//!
//! The pixels of a container carry no length. The original length and file
//! name reach the decoder through one of three channels, in precedence order:
//! an explicit caller override, a JSON side record, or the container file name
//! (`<identifier>-<extension>-<length>.<container_ext>`).

pub mod error;
pub mod naming;
pub mod record;
pub mod resolve;
pub mod side_record;

pub use error::{MetadataError, Result};
pub use naming::{parse_container_file_name, FILE_NAME_PATTERN};
pub use record::MetadataRecord;
pub use resolve::{resolve, MetadataOverride, MetadataSource, ResolveRequest, Resolved};
pub use side_record::{SideRecord, DEFAULT_SIDE_RECORD_NAME, MAX_SIDE_RECORD_SIZE};
