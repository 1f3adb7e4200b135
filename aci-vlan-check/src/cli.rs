use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "aci-vlan-check")]
#[command(about = "Check whether endpoint VLANs are bound on the paths they were learned on")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse one endpoint dump and show the extracted record.
    Endpoint(EndpointArgs),
    /// Parse an rspathAtt listing and show the extracted attachments.
    Attachments(AttachmentsArgs),
    /// Validate endpoint dumps against an attachment listing.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
pub struct EndpointArgs {
    /// File holding `show endpoint` style output.
    pub file: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct AttachmentsArgs {
    /// File holding `dn : uni/.../rspathAtt-[...]` lines.
    pub file: PathBuf,
    /// Only show attachments for this VLAN.
    #[arg(long)]
    pub vlan: Option<String>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Attachment listing to validate against.
    #[arg(short, long)]
    pub attachments: PathBuf,
    /// Endpoint dump; repeat for several entries.
    #[arg(short, long = "endpoint", required = true)]
    pub endpoints: Vec<PathBuf>,
    /// EPG label for the export; pairs with --endpoint in order.
    #[arg(long = "epg")]
    pub epgs: Vec<String>,
    /// Optional settings TOML (fallback_pod, epg_prefix).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Write denied paths as CSV to this file.
    #[arg(long, conflicts_with = "csv_dir")]
    pub csv: Option<PathBuf>,
    /// Write denied paths as CSV into this directory using vlan-validation-<date>.csv.
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,
    /// With --csv-dir, write one CSV per endpoint entry instead of one combined file.
    #[arg(long, requires = "csv_dir")]
    pub per_entry: bool,
    /// Fail when any path is not allowed.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
