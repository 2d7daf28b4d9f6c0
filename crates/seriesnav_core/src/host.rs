//! Capabilities supplied by the host build.
//!
//! | Capability    | Trait           | Used by                         |
//! |---------------|-----------------|---------------------------------|
//! | enumerate all | [`Corpus`]      | collector, landing pages        |
//! | content hash  | [`Fingerprint`] | series cache keys               |
//!
//! Page creation is not a callback here: landing pages are returned as
//! data (see [`crate::landing`]) and the host writes them.

use crate::document::Document;
use std::borrow::Cow;

/// Enumerates every document known to the build.
///
/// May be expensive; the collector calls it at most once per series.
pub trait Corpus {
    fn documents(&self) -> Cow<'_, [Document]>;
}

impl Corpus for [Document] {
    fn documents(&self) -> Cow<'_, [Document]> {
        Cow::Borrowed(self)
    }
}

impl Corpus for Vec<Document> {
    fn documents(&self) -> Cow<'_, [Document]> {
        Cow::Borrowed(self.as_slice())
    }
}

/// A corpus computed on demand by a closure.
pub struct FnCorpus<F>(pub F);

impl<F> Corpus for FnCorpus<F>
where
    F: Fn() -> Vec<Document>,
{
    fn documents(&self) -> Cow<'_, [Document]> {
        Cow::Owned((self.0)())
    }
}

/// Stable content hash, used only to derive cache keys.
pub trait Fingerprint {
    fn fingerprint(&self, value: &str) -> String;
}

impl<F> Fingerprint for F
where
    F: Fn(&str) -> String,
{
    fn fingerprint(&self, value: &str) -> String {
        self(value)
    }
}

/// Default fingerprint: hex-encoded blake3 digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDigest;

impl Fingerprint for ContentDigest {
    fn fingerprint(&self, value: &str) -> String {
        hex::encode(blake3::hash(value.as_bytes()).as_bytes())
    }
}

// ============================================================================
// Host handle
// ============================================================================

/// Everything the engine borrows from the host for one build.
pub struct Host<'a, C: ?Sized, F = ContentDigest> {
    pub corpus: &'a C,
    pub fingerprint: F,
    /// Site-wide URL prefix, prepended to landing page paths.
    pub path_prefix: Option<&'a str>,
}

impl<'a, C: Corpus + ?Sized> Host<'a, C> {
    /// A host using the default [`ContentDigest`] fingerprint.
    pub fn new(corpus: &'a C) -> Self {
        Self {
            corpus,
            fingerprint: ContentDigest,
            path_prefix: None,
        }
    }
}

impl<'a, C: Corpus + ?Sized, F: Fingerprint> Host<'a, C, F> {
    pub fn with_fingerprint<G: Fingerprint>(self, fingerprint: G) -> Host<'a, C, G> {
        Host {
            corpus: self.corpus,
            fingerprint,
            path_prefix: self.path_prefix,
        }
    }

    pub fn with_path_prefix(mut self, prefix: Option<&'a str>) -> Self {
        self.path_prefix = prefix;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_content_digest_is_stable() {
        let a = ContentDigest.fingerprint("My Series");
        let b = ContentDigest.fingerprint("My Series");
        let c = ContentDigest.fingerprint("Other Series");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_closure_corpus_is_called_on_demand() {
        let calls = Cell::new(0);
        let corpus = FnCorpus(|| {
            calls.set(calls.get() + 1);
            vec![Document::new("a", Default::default())]
        });
        assert_eq!(corpus.documents().len(), 1);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_host_builders() {
        let docs = vec![Document::new("a", Default::default())];
        let host = Host::new(&docs)
            .with_path_prefix(Some("blog"))
            .with_fingerprint(|value: &str| value.to_uppercase());
        assert_eq!(host.path_prefix, Some("blog"));
        assert_eq!(host.fingerprint.fingerprint("abc"), "ABC");
        assert_eq!(host.corpus.documents().len(), 1);
    }

    #[test]
    fn test_vec_corpus_borrows() {
        let docs = vec![Document::new("a", Default::default())];
        assert!(matches!(docs.documents(), Cow::Borrowed(_)));
    }
}
