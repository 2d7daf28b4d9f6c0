//! Series membership collection.
//!
//! # Flow
//!
//! ```text
//! document ──► series name ──► fingerprint(name) ──► SeriesCache
//!                                                      │
//!                                 hit ◄────────────────┤
//!                                                      │ miss
//!                                                      ▼
//!                               Corpus::documents() (once per series)
//!                                      │
//!                                      ├── keep content documents
//!                                      ├── keep same series name
//!                                      ├── resolve fields → SeriesItem
//!                                      └── sort (order, date, title)
//! ```
//!
//! The cache holds the full member list. Which members a fragment shows
//! (siblings only, or every member) is decided per document by
//! [`Membership::select`].

use crate::{
    coerce,
    document::Document,
    host::{Corpus, Fingerprint, Host},
    options::{EffectiveOptions, Resolvers},
    order::sort_items,
};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use serde_json::Value;
use std::{borrow::Cow, sync::Arc};

// ============================================================================
// Series items
// ============================================================================

/// One member of a series, as handed to templates and landing pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesItem {
    /// Identity of the source document.
    #[serde(skip)]
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Value,
    pub draft: bool,
    pub order: Value,
    pub series: String,
}

impl SeriesItem {
    pub fn from_document(document: &Document, resolvers: &Resolvers, series: &str) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title().map(str::to_owned),
            slug: coerce::text(&resolvers.slug.resolve(document)),
            date: resolvers.date.resolve(document),
            draft: coerce::is_draft(&resolvers.draft.resolve(document)),
            order: resolvers.order.resolve(document),
            series: series.to_owned(),
        }
    }
}

// ============================================================================
// Cache
// ============================================================================

/// Sorted member lists, keyed by the fingerprint of the series name.
///
/// Entries are only added, never replaced, for the lifetime of a build.
/// Call [`clear`](Self::clear) between builds.
#[derive(Debug, Default)]
pub struct SeriesCache {
    entries: RwLock<FxHashMap<String, Arc<[SeriesItem]>>>,
}

impl SeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<[SeriesItem]>> {
        self.entries.read().get(key).cloned()
    }

    /// Insert unless present; returns the entry that ends up cached.
    pub fn insert(&self, key: String, items: Arc<[SeriesItem]>) -> Arc<[SeriesItem]> {
        let mut entries = self.entries.write();
        entries.entry(key).or_insert(items).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

// ============================================================================
// Membership
// ============================================================================

/// Which members a rendered fragment lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Every member except the current document.
    Siblings,
    /// Every member, the current document included.
    All,
}

impl Membership {
    pub fn select<'a>(self, items: &'a [SeriesItem], document: &Document) -> Cow<'a, [SeriesItem]> {
        match self {
            Self::All => Cow::Borrowed(items),
            Self::Siblings => Cow::Owned(
                items
                    .iter()
                    .filter(|item| item.id != document.id)
                    .cloned()
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Collector
// ============================================================================

/// Resolves series membership against the host corpus, through a cache.
pub struct Collector<'a, C: ?Sized, F> {
    options: &'a EffectiveOptions,
    host: &'a Host<'a, C, F>,
    cache: &'a SeriesCache,
}

impl<'a, C: Corpus + ?Sized, F: Fingerprint> Collector<'a, C, F> {
    pub fn new(options: &'a EffectiveOptions, host: &'a Host<'a, C, F>, cache: &'a SeriesCache) -> Self {
        Self { options, host, cache }
    }

    /// Series name and full sorted member list of `document`.
    ///
    /// `None` when the document is not in a series.
    pub fn collect(&self, document: &Document) -> Option<(String, Arc<[SeriesItem]>)> {
        let name = self.options.resolvers.series_name(document)?;
        let items = self.members(&name);
        Some((name, items))
    }

    /// Full sorted member list of the named series.
    pub fn members(&self, name: &str) -> Arc<[SeriesItem]> {
        let key = self.host.fingerprint.fingerprint(name);
        if let Some(items) = self.cache.get(&key) {
            return items;
        }

        let resolvers = &self.options.resolvers;
        let documents = self.host.corpus.documents();
        let mut items: Vec<SeriesItem> = documents
            .iter()
            .filter(|doc| doc.is_content())
            .filter(|doc| resolvers.series_name(doc).as_deref() == Some(name))
            .map(|doc| SeriesItem::from_document(doc, resolvers, name))
            .collect();
        sort_items(&mut items);

        self.cache.insert(key, items.into())
    }

    /// Distinct series names, in order of first appearance in the corpus.
    pub fn series_names(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.host
            .corpus
            .documents()
            .iter()
            .filter(|doc| doc.is_content())
            .filter_map(|doc| self.options.resolvers.series_name(doc))
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

/// Ids of the other members of `document`'s series.
///
/// When a document changes, these are the documents whose rendered
/// navigation may be out of date.
pub fn stale_siblings<C: Corpus + ?Sized>(
    document: &Document,
    options: &EffectiveOptions,
    corpus: &C,
) -> Vec<String> {
    if !document.is_content() {
        return Vec::new();
    }
    let Some(name) = options.resolvers.series_name(document) else {
        return Vec::new();
    };

    corpus
        .documents()
        .iter()
        .filter(|doc| doc.is_content() && doc.id != document.id)
        .filter(|doc| options.resolvers.series_name(doc).as_deref() == Some(name.as_str()))
        .map(|doc| doc.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{host::FnCorpus, options::resolve};
    use serde_json::json;
    use std::cell::Cell;

    fn doc(id: &str, metadata: Value) -> Document {
        Document::new(id, metadata.as_object().unwrap().clone())
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("a", json!({ "title": "A", "series": "S", "order": 2, "slug": "/a" })),
            doc("b", json!({ "title": "B", "series": "S", "order": 1, "slug": "/b" })),
            doc("c", json!({ "title": "C", "series": "T" })),
            doc("d", json!({ "title": "D" })),
            doc("e", json!({ "title": "E", "series": "S" })).with_kind("json"),
        ]
    }

    #[test]
    fn test_collect_sorted_members() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        let host = Host::new(&docs);
        let cache = SeriesCache::new();
        let collector = Collector::new(&options, &host, &cache);

        let (name, items) = collector.collect(&docs[0]).unwrap();
        assert_eq!(name, "S");
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(items[0].slug.as_deref(), Some("/b"));
    }

    #[test]
    fn test_collect_without_series() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        let host = Host::new(&docs);
        let cache = SeriesCache::new();
        let collector = Collector::new(&options, &host, &cache);

        assert!(collector.collect(&docs[3]).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corpus_enumerated_once_per_series() {
        let calls = Cell::new(0);
        let lazy = FnCorpus(|| {
            calls.set(calls.get() + 1);
            corpus()
        });
        let docs = corpus();
        let options = resolve(None).unwrap();
        let host = Host::new(&lazy);
        let cache = SeriesCache::new();
        let collector = Collector::new(&options, &host, &cache);

        collector.collect(&docs[0]);
        collector.collect(&docs[1]);
        assert_eq!(calls.get(), 1);

        collector.collect(&docs[2]);
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_membership_select() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        let host = Host::new(&docs);
        let cache = SeriesCache::new();
        let (_, items) = Collector::new(&options, &host, &cache)
            .collect(&docs[0])
            .unwrap();

        let siblings = Membership::Siblings.select(&items, &docs[0]);
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].id, "b");
        assert!(matches!(Membership::All.select(&items, &docs[0]), Cow::Borrowed(_)));
    }

    #[test]
    fn test_series_names_first_appearance() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        let host = Host::new(&docs);
        let cache = SeriesCache::new();
        let collector = Collector::new(&options, &host, &cache);
        assert_eq!(collector.series_names(), ["S", "T"]);
    }

    #[test]
    fn test_cache_insert_keeps_first_entry() {
        let cache = SeriesCache::new();
        let first: Arc<[SeriesItem]> = vec![SeriesItem::default()].into();
        let kept = cache.insert("k".into(), first.clone());
        let again = cache.insert("k".into(), Vec::new().into());
        assert!(Arc::ptr_eq(&kept, &first));
        assert!(Arc::ptr_eq(&again, &first));
        cache.clear();
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_stale_siblings() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        assert_eq!(stale_siblings(&docs[0], &options, &docs), ["b"]);
        assert!(stale_siblings(&docs[2], &options, &docs).is_empty());
        assert!(stale_siblings(&docs[3], &options, &docs).is_empty());
        assert!(stale_siblings(&docs[4], &options, &docs).is_empty());
    }
}
