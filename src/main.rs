//! seriesnav - series navigation for a corpus of parsed documents.

mod build;
mod cli;
mod config;
mod corpus;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, stale_siblings};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build => {
            let summary = build_site(&config)?;
            log!(
                "build";
                "done: {} documents, {} updated, {} landing pages",
                summary.documents,
                summary.rendered,
                summary.pages
            );
        }
        Commands::Siblings { id } => {
            let siblings = stale_siblings(&config, id)?;
            log!("series"; "{} documents to re-render after `{id}`", siblings.len());
            for sibling in siblings {
                println!("{sibling}");
            }
        }
    }
    Ok(())
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    log!("config"; "loaded {}", config.config_path.display());
    Ok(config)
}
