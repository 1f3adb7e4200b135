use anyhow::{bail, Context, Result};
use aci_text_core::{parse_attachments_file, parse_endpoint_file};
use aci_vlan_check::batch::UNPARSED_MESSAGE;
use aci_vlan_check::report::{render_attachments_text, render_endpoint_text};

use crate::cli::{AttachmentsArgs, EndpointArgs, OutputFormat};

pub fn run_endpoint(args: EndpointArgs) -> Result<()> {
    let record = parse_endpoint_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let Some(record) = record else {
        bail!("{UNPARSED_MESSAGE} in {}", args.file.display());
    };

    match args.format {
        OutputFormat::Text => println!("{}", render_endpoint_text(&record)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

pub fn run_attachments(args: AttachmentsArgs) -> Result<()> {
    let mut records = parse_attachments_file(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    if let Some(vlan) = args.vlan.as_deref() {
        records.retain(|r| r.vlan == vlan.trim());
    }

    match args.format {
        OutputFormat::Text => println!("{}", render_attachments_text(&records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}
