//! Endpoint and attachment parsers plus file entry points.

pub mod attachment;
pub mod endpoint;

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::{EndpointRecord, PathAttachmentRecord};

pub use attachment::{parse_attachment_line, parse_attachments};
pub use endpoint::parse_endpoint;

/// Errors that can occur while loading CLI output from disk.
///
/// Parsing itself never fails: unrecognized text yields `None` or an empty
/// list.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read input file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Read a file as text, replacing invalid UTF-8 rather than rejecting it.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an endpoint dump stored in a file.
pub fn parse_endpoint_file(path: &Path) -> Result<Option<EndpointRecord>, ParseError> {
    Ok(parse_endpoint(&read_text(path)?))
}

/// Parse an attachment listing stored in a file.
pub fn parse_attachments_file(path: &Path) -> Result<Vec<PathAttachmentRecord>, ParseError> {
    Ok(parse_attachments(&read_text(path)?))
}
