//! Synchronize a document: validate, then write updated tags back

use std::fs;
use std::path::Path;

use braidmap_core::error::{BraidmapError, Result};
use braidmap_core::format::OutputFormat;
use braidmap_core::overlay::{annotate_warnings, dismiss_warnings};
use braidmap_core::sync::{apply_edits, synchronize, SyncOutcome};
use braidmap_core::warning::Warning;

use crate::cli::Cli;

pub fn execute(cli: &Cli, file: &Path, annotate: bool, dry_run: bool) -> Result<()> {
    let text = fs::read_to_string(file)?;

    // Stale overlays from earlier runs are ignored during validation
    let dismissed = dismiss_warnings(&text);

    match synchronize(&dismissed)? {
        SyncOutcome::Clean(rewrite) => {
            let updated = apply_edits(&dismissed, &rewrite.edits);
            let changed = updated != text;
            if changed && !dry_run {
                fs::write(file, &updated)?;
            }

            match cli.format {
                OutputFormat::Json => {
                    let output = serde_json::json!({
                        "status": "clean",
                        "notes": rewrite.notes,
                        "edits": rewrite.edits.len(),
                        "changed": changed,
                        "dry_run": dry_run,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Human => {
                    if !cli.quiet {
                        println!(
                            "Synchronized {} notes ({} edits){}",
                            rewrite.notes,
                            rewrite.edits.len(),
                            if dry_run { " [dry run]" } else { "" }
                        );
                    }
                }
            }
            Ok(())
        }
        SyncOutcome::Flagged(warnings) => {
            if annotate && !dry_run {
                fs::write(file, annotate_warnings(&text, &warnings))?;
            }
            report_warnings(cli, &warnings)?;
            Err(BraidmapError::DocumentFlagged {
                count: warnings.len(),
            })
        }
    }
}

/// Print warnings on stdout in the requested format
pub fn report_warnings(cli: &Cli, warnings: &[Warning]) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "flagged",
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for warning in warnings {
                println!("line {}: {}", warning.line + 1, warning.kind.message());
            }
        }
    }
    Ok(())
}
