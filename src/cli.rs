//! CLI argument parsing for braidmap
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use braidmap_core::format::OutputFormat;

/// Braidmap - maintain indented outlines as linked, studyable mind maps
#[derive(Parser, Debug)]
#[command(name = "braidmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BRAIDMAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new mind-map document
    Init {
        /// Path of the document to create
        file: PathBuf,

        /// Document title (defaults to "My mind map")
        #[arg(long, short)]
        title: Option<String>,

        /// Treat each top-level heading as its own map
        #[arg(long)]
        separate_headings: bool,

        /// Disable implicit linking of notes with identical content
        #[arg(long)]
        no_crosslink: bool,

        /// Configuration file providing default settings
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Validate a document and write updated note tags back into it
    Sync {
        /// Path of the document to synchronize
        file: PathBuf,

        /// Write warning tags into the document when it is flagged
        #[arg(long)]
        annotate: bool,

        /// Plan edits without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a document without modifying it
    Check {
        /// Path of the document to check
        file: PathBuf,
    },

    /// Remove all warning tags from a document
    Dismiss {
        /// Path of the document to clean
        file: PathBuf,
    },

    /// Export a document's node and edge list
    Graph {
        /// Path of the document to export
        file: PathBuf,
    },
}

/// Parse output format from string
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_help() {
        // Should not panic
        let result = Cli::try_parse_from(["braidmap", "--help"]);
        assert!(result.is_err()); // --help exits
    }

    #[test]
    fn test_parse_cli_version() {
        // Should not panic
        let result = Cli::try_parse_from(["braidmap", "--version"]);
        assert!(result.is_err()); // --version exits
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["braidmap", "init", "map.md", "--title", "Geology"]).unwrap();
        if let Commands::Init { file, title, .. } = cli.command {
            assert_eq!(file, PathBuf::from("map.md"));
            assert_eq!(title, Some("Geology".to_string()));
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_parse_sync_flags() {
        let cli =
            Cli::try_parse_from(["braidmap", "sync", "map.md", "--annotate", "--dry-run"]).unwrap();
        if let Commands::Sync { annotate, dry_run, .. } = cli.command {
            assert!(annotate);
            assert!(dry_run);
        } else {
            panic!("Expected Sync command");
        }
    }

    #[test]
    fn test_parse_format() {
        let cli = Cli::try_parse_from(["braidmap", "--format", "json", "check", "map.md"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["braidmap"]).is_err());
    }
}
