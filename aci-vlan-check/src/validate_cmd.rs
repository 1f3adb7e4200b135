use std::fs;
use std::path::{Path, PathBuf};

use aci_text_core::{parse_attachments_file, read_text, PathAttachmentRecord};
use aci_vlan_check::batch::{validate_batch, BatchReport, EntryInput};
use aci_vlan_check::export::{build_csv, csv_file_name, entry_csv, ExportError};
use aci_vlan_check::report::render_batch_text;
use aci_vlan_check::settings::{default_settings, load_settings, Settings};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::cli::{OutputFormat, ValidateArgs};
use crate::path_guard::ensure_not_an_input;

pub fn run_validate(args: ValidateArgs, verbose: bool) -> Result<()> {
    if args.epgs.len() > args.endpoints.len() {
        bail!(
            "got {} --epg labels for {} --endpoint files",
            args.epgs.len(),
            args.endpoints.len()
        );
    }
    let settings = match args.config.as_deref() {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => default_settings(),
    };

    let attachments = parse_attachments_file(&args.attachments)
        .with_context(|| format!("failed to load {}", args.attachments.display()))?;
    if attachments.is_empty() {
        warn!(
            file = %args.attachments.display(),
            "no attachments recognized; every path will be reported as not allowed"
        );
    }

    let inputs = args
        .endpoints
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            Ok(EntryInput {
                label: path.display().to_string(),
                epg: args.epgs.get(idx).cloned(),
                text: read_text(path)
                    .with_context(|| format!("failed to load {}", path.display()))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let report = validate_batch(&inputs, &attachments);

    match args.format {
        OutputFormat::Text => println!("{}", render_batch_text(&report, verbose)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let mut guarded: Vec<&Path> = args.endpoints.iter().map(PathBuf::as_path).collect();
    guarded.push(&args.attachments);
    let today = Local::now().date_naive();
    if let Some(path) = args.csv.as_deref() {
        write_combined(path, &guarded, &report, &attachments, &settings)?;
    } else if let Some(dir) = args.csv_dir.as_deref() {
        if args.per_entry {
            write_per_entry(dir, today, &guarded, &report, &attachments, &settings)?;
        } else {
            let path = dir.join(csv_file_name(today));
            write_combined(&path, &guarded, &report, &attachments, &settings)?;
        }
    }

    if args.strict && report.not_allowed > 0 {
        bail!(
            "validate failed in strict mode: {} paths not allowed",
            report.not_allowed
        );
    }
    Ok(())
}

fn write_combined(
    path: &Path,
    inputs: &[&Path],
    report: &BatchReport,
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Result<()> {
    ensure_not_an_input(path, inputs)?;
    let csv = build_csv(report, attachments, settings).context("CSV export failed")?;
    fs::write(path, &csv).with_context(|| format!("failed to write CSV {}", path.display()))?;
    info!(file = %path.display(), rows = csv.lines().count() - 1, "wrote denied paths");
    Ok(())
}

fn write_per_entry(
    dir: &Path,
    date: NaiveDate,
    inputs: &[&Path],
    report: &BatchReport,
    attachments: &[PathAttachmentRecord],
    settings: &Settings,
) -> Result<()> {
    let stem = csv_file_name(date);
    let stem = stem.trim_end_matches(".csv");
    let mut written = 0;
    for (idx, entry) in report.entries.iter().enumerate() {
        let csv = match entry_csv(entry, attachments, settings) {
            Ok(csv) => csv,
            Err(ExportError::NothingDenied) => {
                info!(entry = %entry.label, "no denied paths; skipping CSV");
                continue;
            }
        };
        let path = dir.join(format!("{stem}-{}.csv", idx + 1));
        ensure_not_an_input(&path, inputs)?;
        fs::write(&path, &csv)
            .with_context(|| format!("failed to write CSV {}", path.display()))?;
        info!(file = %path.display(), entry = %entry.label, "wrote denied paths");
        written += 1;
    }
    if written == 0 {
        bail!("CSV export failed: {}", ExportError::NothingDenied);
    }
    Ok(())
}
