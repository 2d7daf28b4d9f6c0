//! Navigation fragment templates.
//!
//! A template turns a [`TemplateContext`] into an opaque HTML string; the
//! renderer splices it into the tree without looking at it.
//!
//! | Template             | Used when                        |
//! |----------------------|----------------------------------|
//! | [`InlineTemplate`]   | inline mode, no landing page     |
//! | [`ExternalTemplate`] | external mode or landing page on |
//! | closure              | supplied by the host             |

use crate::{collect::SeriesItem, document::Document, options::EffectiveOptions};
use quick_xml::escape::escape;
use std::{borrow::Cow, fmt, fmt::Write};

/// Values handed to a template for one fragment.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// `"top"`, `"bottom"`, or the custom placeholder string.
    pub placeholder: &'a str,
    /// Series name.
    pub name: &'a str,
    /// Series page path; `None` unless fragments link to a series page.
    pub slug: Option<&'a str>,
    /// Members to list, already ordered.
    pub items: &'a [SeriesItem],
    pub options: &'a EffectiveOptions,
    /// The document being rendered.
    pub document: &'a Document,
}

/// Renders one navigation fragment.
pub trait Template: Send + Sync {
    fn render(&self, context: &TemplateContext<'_>) -> String;

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("custom")
    }
}

impl<F> Template for F
where
    F: Fn(&TemplateContext<'_>) -> String + Send + Sync,
{
    fn render(&self, context: &TemplateContext<'_>) -> String {
        self(context)
    }
}

impl fmt::Debug for dyn Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template({})", self.describe())
    }
}

/// Ordered list of the other posts in the series.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineTemplate;

impl Template for InlineTemplate {
    fn render(&self, context: &TemplateContext<'_>) -> String {
        let mut list = String::new();
        for item in context.items {
            let title = escape(item.title.as_deref().unwrap_or_default());
            // Drafts are listed but never linked.
            let _ = match item.slug.as_deref() {
                Some(slug) if !item.draft => {
                    write!(list, r#"<li><a href="{}">{title}</a></li>"#, escape(slug))
                }
                _ => write!(list, "<li>{title}</li>"),
            };
        }

        format!(
            concat!(
                r#"<div class="series--inline-toc">"#,
                "\n  <div>Other posts in the {} series</div>",
                "\n  <ol>{}</ol>",
                "\n</div>"
            ),
            escape(context.name),
            list
        )
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("inline")
    }
}

/// Single link to the series landing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalTemplate;

impl Template for ExternalTemplate {
    fn render(&self, context: &TemplateContext<'_>) -> String {
        format!(
            concat!(
                r#"<div class="series--external-toc">"#,
                "\n  <p>This post is part of the <a href=\"{}\">{}</a> series</p>",
                "\n</div>"
            ),
            escape(context.slug.unwrap_or_default()),
            escape(context.name)
        )
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("external")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::resolve;

    fn item(title: &str, slug: Option<&str>, draft: bool) -> SeriesItem {
        SeriesItem {
            title: Some(title.into()),
            slug: slug.map(str::to_owned),
            draft,
            ..Default::default()
        }
    }

    #[test]
    fn test_inline_template_lists_items() {
        let options = resolve(None).unwrap();
        let document = Document::new("doc", Default::default());
        let items = [
            item("First", Some("/first"), false),
            item("Draft", Some("/draft"), true),
            item("No slug", None, false),
        ];
        let html = InlineTemplate.render(&TemplateContext {
            placeholder: "bottom",
            name: "Rust & Co",
            slug: None,
            items: &items,
            options: &options,
            document: &document,
        });

        assert!(html.starts_with(r#"<div class="series--inline-toc">"#));
        assert!(html.contains("Other posts in the Rust &amp; Co series"));
        assert!(html.contains(r#"<li><a href="/first">First</a></li>"#));
        assert!(html.contains("<li>Draft</li>"));
        assert!(html.contains("<li>No slug</li>"));
    }

    #[test]
    fn test_external_template_links_landing_page() {
        let options = resolve(None).unwrap();
        let document = Document::new("doc", Default::default());
        let html = ExternalTemplate.render(&TemplateContext {
            placeholder: "top",
            name: "<Series>",
            slug: Some("/series/my-series"),
            items: &[],
            options: &options,
            document: &document,
        });
        assert!(html.contains(
            r#"This post is part of the <a href="/series/my-series">&lt;Series&gt;</a> series"#
        ));
    }

    #[test]
    fn test_template_debug() {
        let inline: &dyn Template = &InlineTemplate;
        assert_eq!(format!("{inline:?}"), "Template(inline)");
    }
}
