//! Site configuration management for `seriesnav.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `[build]`   | Corpus and output paths, global path prefix       |
//! | `[series]`  | Series navigation options (validated by the core) |
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! output = "public"
//! path_prefix = "blog"
//!
//! [series.resolvers]
//! slug = { field = "permalink" }
//!
//! [series.render]
//! placeholder = "both"
//! use_landing_page = true
//! landing_page_component = "templates/series.html"
//! landing_page_path_prefix = "series"
//! ```

pub mod defaults;
mod error;

pub use error::ConfigError;

use crate::cli::Cli;
use anyhow::{Context, Result, bail};
use educe::Educe;
use seriesnav_core::RawOptions;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// [build] Section
// ============================================================================

/// Build paths.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root (set from the CLI, never read from the file)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Directory of parsed documents (`*.json`)
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output directory for transformed trees and landing pages
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Global path prefix, prepended to every landing page path
    #[serde(default = "defaults::build::path_prefix")]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: String,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing seriesnav.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Raw series navigation options
    #[serde(default)]
    pub series: toml::Table,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Global path prefix, or `None` when blank
    pub fn path_prefix(&self) -> Option<&str> {
        Some(self.build.path_prefix.as_str()).filter(|prefix| !prefix.trim().is_empty())
    }

    /// Convert the `[series]` table into raw options.
    ///
    /// Only the shape is checked here; kinds are validated by the core.
    pub fn series_options(&self) -> Result<RawOptions> {
        let value = serde_json::to_value(&self.series)
            .map_err(|err| ConfigError::Validation(format!("[series] {err}")))?;
        let raw = RawOptions::from_value(&value).map_err(ConfigError::from)?;
        Ok(raw)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.path_prefix, cli.path_prefix.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.root = Some(root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before a build
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if !self.build.content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[build.content] `{}` is not a directory",
                self.build.content.display()
            )));
        }

        if self.build.output == self.build.content {
            bail!(ConfigError::Validation(
                "[build.output] must differ from [build.content]".into()
            ));
        }

        self.series_options()
            .context("Failed to read [series] options")?;

        Ok(())
    }
}
