//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Series navigation for a corpus of parsed documents
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: seriesnav.toml)
    #[arg(short = 'C', long, default_value = "seriesnav.toml")]
    pub config: PathBuf,

    /// Global path prefix for landing pages
    ///
    /// Example: a site served under `/blog`:
    ///   seriesnav --path-prefix /blog build
    #[arg(long = "path-prefix")]
    pub path_prefix: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Insert series navigation into every document and write landing pages
    Build,

    /// List the documents to re-render after the given document changed
    Siblings {
        /// document id (defaults to the path relative to the content directory)
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from([
            "seriesnav",
            "--root",
            "site",
            "-c",
            "docs",
            "-o",
            "out",
            "--path-prefix",
            "/blog",
            "build",
        ]);
        assert_eq!(cli.root.as_deref(), Some(std::path::Path::new("site")));
        assert_eq!(cli.content.as_deref(), Some(std::path::Path::new("docs")));
        assert_eq!(cli.output.as_deref(), Some(std::path::Path::new("out")));
        assert_eq!(cli.path_prefix.as_deref(), Some("/blog"));
        assert_eq!(cli.config, PathBuf::from("seriesnav.toml"));
        assert!(matches!(cli.command, Commands::Build));
    }

    #[test]
    fn test_parse_siblings() {
        let cli = Cli::parse_from(["seriesnav", "-C", "site.toml", "siblings", "posts/a.json"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(matches!(cli.command, Commands::Siblings { ref id } if id == "posts/a.json"));
    }
}
