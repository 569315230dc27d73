//! Validate a document without modifying it

use std::fs;
use std::path::Path;

use braidmap_core::error::{BraidmapError, Result};
use braidmap_core::format::OutputFormat;
use braidmap_core::overlay::dismiss_warnings;
use braidmap_core::sync::validate;

use crate::cli::Cli;

pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)?;
    let (doc, warnings) = validate(&dismiss_warnings(&text))?;

    if !warnings.is_empty() {
        super::sync::report_warnings(cli, &warnings)?;
        return Err(BraidmapError::DocumentFlagged {
            count: warnings.len(),
        });
    }

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "status": "clean",
                "title": doc.title,
                "notes": doc.notes.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("{}: clean ({} notes)", doc.title, doc.notes.len());
            }
        }
    }
    Ok(())
}
