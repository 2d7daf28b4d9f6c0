//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── SeriesNav::new()      ──► options validated, or abort (nothing written)
//!     │
//!     ├── load_corpus()         ──► documents + trees
//!     │
//!     ├── write_landing_pages() ──► <output><path>/index.json   (landing mode)
//!     │
//!     └── transform_documents() ──► <output>/<source>.json      (parallel)
//! ```

use crate::{
    config::SiteConfig,
    corpus::{LoadedCorpus, load_corpus},
    log,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use seriesnav_core::{Host, LandingPage, SeriesNav};
use serde::Serialize;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// Counts reported after a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    /// Documents whose tree received navigation
    pub rendered: usize,
    pub pages: usize,
}

/// Build every document of the corpus.
///
/// Invalid `[series]` options abort the build before anything is written.
pub fn build_site(config: &SiteConfig) -> Result<BuildSummary> {
    let nav = create_nav(config)?;

    let corpus = load_corpus(&config.build.content)?;
    log!("corpus"; "loaded {} documents", corpus.len());

    let host = Host::new(&corpus).with_path_prefix(config.path_prefix());
    let output = &config.build.output;

    let pages = nav.landing_pages(&host)?;
    write_landing_pages(output, &pages)?;

    let rendered = transform_documents(&nav, &host, &corpus, output)?;
    log!(
        "series";
        "{} series, {} of {} documents updated",
        nav.cache().len(),
        rendered,
        corpus.len()
    );

    Ok(BuildSummary {
        documents: corpus.len(),
        rendered,
        pages: pages.len(),
    })
}

/// Validate options up front; configuration errors are reported and fatal.
pub fn create_nav(config: &SiteConfig) -> Result<SeriesNav> {
    let nav = config
        .series_options()
        .and_then(|raw| SeriesNav::new(Some(&raw)).map_err(Into::into));

    nav.inspect_err(|err| log!("error"; "{err:#}"))
}

fn write_landing_pages(output: &Path, pages: &[LandingPage]) -> Result<()> {
    for page in pages {
        write_json(&landing_page_file(output, &page.path), page)?;
        log!("landing"; "{} ({} items)", page.path, page.context.items.len());
    }
    Ok(())
}

/// Transform all documents in parallel; returns how many changed.
fn transform_documents(
    nav: &SeriesNav,
    host: &Host<'_, LoadedCorpus>,
    corpus: &LoadedCorpus,
    output: &Path,
) -> Result<usize> {
    let changed = corpus
        .documents
        .par_iter()
        .zip(corpus.entries.par_iter())
        .map(|(document, entry)| -> Result<bool> {
            let tree = nav
                .transform(host, document, &entry.tree)
                .with_context(|| format!("Failed to render `{}`", document.id))?;
            write_json(&output.join(&entry.source), &*tree)?;
            Ok(matches!(tree, Cow::Owned(_)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(changed.into_iter().filter(|changed| *changed).count())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Ids of the documents to re-render after `id` changed.
pub fn stale_siblings(config: &SiteConfig, id: &str) -> Result<Vec<String>> {
    let nav = create_nav(config)?;
    let corpus = load_corpus(&config.build.content)?;
    let document = corpus
        .find(id)
        .with_context(|| format!("No document with id `{id}`"))?;
    Ok(nav.stale_siblings(document, &corpus))
}

/// Output location of a landing page.
fn landing_page_file(output: &Path, page_path: &str) -> PathBuf {
    output.join(page_path.trim_start_matches('/')).join("index.json")
}
