//! Standalone series pages.
//!
//! In landing-page mode every series gets one page listing all of its
//! members. Pages are returned as data; writing them is up to the host.

use crate::{
    collect::{Collector, SeriesCache, SeriesItem},
    error::Result,
    host::{Corpus, Fingerprint, Host},
    options::EffectiveOptions,
};
use serde::Serialize;

/// A page the host should create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPage {
    pub path: String,
    /// Host template used to render the page.
    pub component: String,
    pub context: LandingContext,
}

/// Data handed to the landing page component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingContext {
    pub name: String,
    pub items: Vec<SeriesItem>,
    pub path: String,
}

/// One landing page per series, in order of first appearance.
///
/// Empty unless `use_landing_page` is set. External mode alone only links
/// to a page the host provides. Member lists go through the
/// shared cache, so pages and inline fragments agree on ordering.
///
/// # Errors
///
/// `InvalidArgument` when the slug strategy does not produce a string.
pub fn landing_pages<C, F>(
    options: &EffectiveOptions,
    host: &Host<'_, C, F>,
    cache: &SeriesCache,
) -> Result<Vec<LandingPage>>
where
    C: Corpus + ?Sized,
    F: Fingerprint,
{
    let render = &options.render;
    let Some(component) = render
        .landing_page_component
        .as_deref()
        .filter(|_| render.use_landing_page)
    else {
        return Ok(Vec::new());
    };

    let collector = Collector::new(options, host, cache);
    collector
        .series_names()
        .into_iter()
        .map(|name| {
            let path = options.series_path(&name, host.path_prefix)?;
            let items = collector.members(&name).to_vec();
            Ok(LandingPage {
                path: path.clone(),
                component: component.to_owned(),
                context: LandingContext { name, items, path },
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        document::Document,
        error::SeriesError,
        options::{OptionValue, RawOptions, resolve},
    };
    use serde_json::{Value, json};

    fn doc(id: &str, metadata: Value) -> Document {
        Document::new(id, metadata.as_object().unwrap().clone())
    }

    fn corpus() -> Vec<Document> {
        vec![
            doc("one", json!({ "title": "One", "series": "My Title Series", "order": 2 })),
            doc("other", json!({ "title": "Other", "series": "Second" })),
            doc("two", json!({ "title": "Two", "series": "My Title Series", "order": 1 })),
            doc("plain", json!({ "title": "Plain" })),
        ]
    }

    fn landing(extra: Value) -> EffectiveOptions {
        let mut render = json!({
            "use_landing_page": true,
            "landing_page_component": "templates/series.html"
        });
        if let (Some(render), Some(extra)) = (render.as_object_mut(), extra.as_object()) {
            render.extend(extra.clone());
        }
        let raw = RawOptions::from_value(&json!({ "render": render })).unwrap();
        resolve(Some(&raw)).unwrap()
    }

    #[test]
    fn test_no_pages_without_landing_mode() {
        let docs = corpus();
        let options = resolve(None).unwrap();
        let pages = landing_pages(&options, &Host::new(&docs), &SeriesCache::new()).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_no_pages_in_external_mode_alone() {
        let docs = corpus();
        let raw = RawOptions::from_value(&json!({
            "render": { "mode": "external", "landing_page_component": "series.html" }
        }))
        .unwrap();
        let options = resolve(Some(&raw)).unwrap();
        let pages = landing_pages(&options, &Host::new(&docs), &SeriesCache::new()).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_one_page_per_series() {
        let docs = corpus();
        let options = landing(json!({}));
        let cache = SeriesCache::new();
        let pages = landing_pages(&options, &Host::new(&docs), &cache).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].path, "/my-title-series");
        assert_eq!(pages[0].component, "templates/series.html");
        assert_eq!(pages[0].context.name, "My Title Series");
        assert_eq!(pages[0].context.path, "/my-title-series");
        let titles: Vec<_> = pages[0]
            .context
            .items
            .iter()
            .map(|i| i.title.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(titles, ["Two", "One"]);
        assert_eq!(pages[1].path, "/second");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_page_paths_with_prefixes() {
        let docs = corpus();
        let options = landing(json!({ "landing_page_path_prefix": "series" }));
        let pages = landing_pages(&options, &Host::new(&docs), &SeriesCache::new()).unwrap();
        assert_eq!(pages[0].path, "/series/my-title-series");

        let host = Host::new(&docs).with_path_prefix(Some("/blog/"));
        let pages = landing_pages(&options, &host, &SeriesCache::new()).unwrap();
        assert_eq!(pages[0].path, "/blog/series/my-title-series");
    }

    #[test]
    fn test_non_string_slug_is_an_error() {
        let docs = corpus();
        let mut raw = RawOptions::from_value(&json!({
            "render": { "use_landing_page": true, "landing_page_component": "series.html" }
        }))
        .unwrap();
        raw.resolvers.to_slug = Some(OptionValue::slugify(|_: &str| json!(42)));
        let options = resolve(Some(&raw)).unwrap();

        let err = landing_pages(&options, &Host::new(&docs), &SeriesCache::new()).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidArgument { .. }));
    }

    #[test]
    fn test_context_serializes_items() {
        let docs = corpus();
        let options = landing(json!({}));
        let pages = landing_pages(&options, &Host::new(&docs), &SeriesCache::new()).unwrap();
        let value = serde_json::to_value(&pages[1]).unwrap();
        assert_eq!(value["context"]["name"], "Second");
        assert_eq!(value["context"]["items"][0]["title"], "Other");
        assert!(value["context"]["items"][0].get("id").is_none());
    }
}
