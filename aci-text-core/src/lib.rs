//! Extraction of endpoint-location and EPG path-attachment records from
//! pasted fabric controller CLI output.

pub mod grammar;
pub mod model;
pub mod parse;

pub use grammar::{Grammar, Rule};
pub use model::{
    format_full_path, normalize_path, EndpointRecord, PathAttachmentRecord, PathKind, PathName,
};
pub use parse::{
    parse_attachment_line, parse_attachments, parse_attachments_file, parse_endpoint,
    parse_endpoint_file, read_text, ParseError,
};
