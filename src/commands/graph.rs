//! Export a document's graph projection

use std::fs;
use std::path::Path;

use braidmap_core::error::{BraidmapError, Result};
use braidmap_core::format::OutputFormat;
use braidmap_core::graph::build_graph;
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

    let graph = build_graph(&doc);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        OutputFormat::Human => {
            println!(
                "{}: {} nodes, {} edges",
                graph.title,
                graph.nodes.len(),
                graph.edges.len()
            );
            for edge in &graph.edges {
                println!("{} -> {}", edge.source, edge.target);
            }
        }
    }
    Ok(())
}
