//! Series navigation for document build pipelines.
//!
//! Documents that share a `series` metadata value get a navigation block
//! (a list of, or a link to, the other members) inserted into their tree.
//!
//! # Architecture
//!
//! ```text
//! RawOptions ──► options::resolve ──► EffectiveOptions (validated once)
//!                                          │
//! Document ──► Collector ──► SeriesCache ──┤ sorted members (order::compare)
//!                                          │
//!                       path::resolve_series_path (landing mode)
//!                                          │
//!                 render::plan_edits ──► Tree::apply ──► Cow<Tree>
//!
//! landing::landing_pages ──► one LandingPage per series (landing mode)
//! collect::stale_siblings ──► ids to re-render when a member changes
//! ```
//!
//! # Example
//!
//! ```
//! use seriesnav_core::{Document, Host, Node, SeriesNav};
//! use serde_json::json;
//!
//! let meta = |v: serde_json::Value| v.as_object().cloned().unwrap_or_default();
//! let docs = vec![
//!     Document::new("a", meta(json!({ "title": "A", "series": "Intro", "slug": "/a" }))),
//!     Document::new("b", meta(json!({ "title": "B", "series": "Intro", "slug": "/b" }))),
//! ];
//!
//! let nav = SeriesNav::new(None)?;
//! let tree = Node::root(vec![Node::leaf("paragraph", "Hello")]);
//! let out = nav.transform(&Host::new(&docs), &docs[0], &tree)?;
//! assert_eq!(out.children.len(), 2);
//! # Ok::<(), seriesnav_core::SeriesError>(())
//! ```

pub mod coerce;
pub mod collect;
pub mod document;
pub mod error;
pub mod host;
pub mod landing;
pub mod options;
pub mod order;
pub mod path;
pub mod render;
pub mod template;

pub use collect::{Collector, Membership, SeriesCache, SeriesItem, stale_siblings};
pub use document::{Document, Node, Tree, TreeEdit};
pub use error::{Result, SeriesError};
pub use host::{ContentDigest, Corpus, Fingerprint, FnCorpus, Host};
pub use landing::{LandingContext, LandingPage, landing_pages};
pub use options::{EffectiveOptions, OptionValue, Placeholder, RawOptions, RenderMode, resolve};
pub use path::resolve_series_path;
pub use template::{ExternalTemplate, InlineTemplate, Template, TemplateContext};

use std::borrow::Cow;

/// Per-build engine: validated options plus the series cache.
///
/// Build one per build run. Options are checked up front, so a bad
/// configuration fails before any document is touched.
#[derive(Debug)]
pub struct SeriesNav {
    options: EffectiveOptions,
    cache: SeriesCache,
}

impl SeriesNav {
    /// Resolve and validate `raw` over the defaults.
    pub fn new(raw: Option<&RawOptions>) -> Result<Self> {
        Ok(Self::from_options(resolve(raw)?))
    }

    pub fn from_options(options: EffectiveOptions) -> Self {
        Self {
            options,
            cache: SeriesCache::new(),
        }
    }

    pub fn options(&self) -> &EffectiveOptions {
        &self.options
    }

    pub fn cache(&self) -> &SeriesCache {
        &self.cache
    }

    pub fn collector<'a, C, F>(&'a self, host: &'a Host<'a, C, F>) -> Collector<'a, C, F>
    where
        C: Corpus + ?Sized,
        F: Fingerprint,
    {
        Collector::new(&self.options, host, &self.cache)
    }

    /// Insert the series navigation into one document's tree.
    ///
    /// Documents outside any series (or of another kind) come back as the
    /// input tree itself.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when, in landing-page mode, the slug strategy does
    /// not produce a string.
    pub fn transform<'t, C, F>(
        &self,
        host: &Host<'_, C, F>,
        document: &Document,
        tree: &'t Tree,
    ) -> Result<Cow<'t, Tree>>
    where
        C: Corpus + ?Sized,
        F: Fingerprint,
    {
        if !document.is_content() {
            return Ok(Cow::Borrowed(tree));
        }
        let Some((name, items)) = self.collector(host).collect(document) else {
            return Ok(Cow::Borrowed(tree));
        };

        let path = if self.options.render.uses_landing_page() {
            Some(self.options.series_path(&name, host.path_prefix)?)
        } else {
            None
        };
        Ok(render::render(
            document,
            tree,
            &self.options,
            &items,
            path.as_deref(),
        ))
    }

    /// Landing pages for every series (landing-page mode only).
    pub fn landing_pages<C, F>(&self, host: &Host<'_, C, F>) -> Result<Vec<LandingPage>>
    where
        C: Corpus + ?Sized,
        F: Fingerprint,
    {
        landing::landing_pages(&self.options, host, &self.cache)
    }

    /// Ids of documents to re-render after `document` changed.
    pub fn stale_siblings<C: Corpus + ?Sized>(&self, document: &Document, corpus: &C) -> Vec<String> {
        collect::stale_siblings(document, &self.options, corpus)
    }
}
