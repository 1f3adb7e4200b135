//! VLAN allowance checks for fabric endpoints.
//!
//! Given an endpoint-location dump and a listing of EPG static path bindings
//! (both pasted CLI text, parsed by `aci-text-core`), this library decides for
//! every interface path the endpoint was learned on whether its VLAN is bound
//! there, and produces remediation CSV for the paths that are not.
//!
//! # Architecture
//!
//! - [`validate`]: per-path allow/deny verdicts for one endpoint
//! - [`batch`]: validation across several endpoint dumps
//! - [`reconstruct`]: fully-qualified `pathep` strings for denied paths
//! - [`export`]: `VLAN,EPG,PATH` CSV rows and file naming
//! - [`settings`]: TOML settings (fallback pod, EPG prefix)
//! - [`report`]: terminal rendering
//!
//! # Examples
//!
//! ```ignore
//! use aci_text_core::{parse_attachments, parse_endpoint};
//! use aci_vlan_check::validate::validate_endpoint;
//!
//! let endpoint = parse_endpoint(&endpoint_text).expect("endpoint");
//! let attachments = parse_attachments(&attachment_text);
//! for verdict in validate_endpoint(&endpoint, &attachments) {
//!     println!("{} {}", verdict.path, verdict.status);
//! }
//! ```

pub mod batch;
pub mod export;
pub mod reconstruct;
pub mod report;
pub mod settings;
pub mod validate;
