//! Create a new mind-map document

use std::fs;
use std::path::Path;

use braidmap_core::config::EngineConfig;
use braidmap_core::error::{BraidmapError, Result};
use braidmap_core::format::OutputFormat;
use braidmap_core::settings::render_map_tag;

use crate::cli::Cli;

const DEFAULT_TITLE: &str = "My mind map";

pub fn execute(
    cli: &Cli,
    file: &Path,
    title: Option<&str>,
    separate_headings: bool,
    no_crosslink: bool,
    config: Option<&Path>,
) -> Result<()> {
    if file.exists() {
        return Err(BraidmapError::AlreadyExists {
            context: "document".to_string(),
            value: file.display().to_string(),
        });
    }

    let mut settings = match config {
        Some(path) => EngineConfig::load(path)?.defaults,
        None => EngineConfig::default().defaults,
    };
    if separate_headings {
        settings.separate_headings = true;
    }
    if no_crosslink {
        settings.crosslink = false;
    }

    let title = title.unwrap_or(DEFAULT_TITLE);
    let content = format!("# {}\n{}\n", title, render_map_tag(&settings));
    fs::write(file, content)?;

    tracing::info!(file = %file.display(), "document created");

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "file": file.display().to_string(),
                "title": title,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Created {}", file.display());
            }
        }
    }

    Ok(())
}
