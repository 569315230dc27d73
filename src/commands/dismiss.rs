//! Remove warning overlays from a document

use std::fs;
use std::path::Path;

use braidmap_core::error::Result;
use braidmap_core::format::OutputFormat;
use braidmap_core::overlay::dismiss_warnings;

use crate::cli::Cli;

pub fn execute(cli: &Cli, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file)?;
    let cleaned = dismiss_warnings(&text);
    let changed = cleaned != text;
    if changed {
        fs::write(file, &cleaned)?;
    }

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "changed": changed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                if changed {
                    println!("Dismissed warnings in {}", file.display());
                } else {
                    println!("No warnings in {}", file.display());
                }
            }
        }
    }
    Ok(())
}
