//! Tree mutation.
//!
//! # Placeholder state machine
//!
//! | Placeholder | Edits                                                     |
//! |-------------|-----------------------------------------------------------|
//! | `top`       | prepend one fragment                                      |
//! | `bottom`    | append one fragment                                       |
//! | `both`      | prepend and append, each rendered with its own tag        |
//! | custom      | replace the first top-level marker node; none if missing  |
//!
//! Edits are planned first and applied in one step, so a document outside
//! any series comes back as the very same tree.

use crate::{
    collect::SeriesItem,
    document::{Document, Node, Tree, TreeEdit},
    options::{EffectiveOptions, Placeholder},
    template::TemplateContext,
};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Edits for one document; at most two.
pub type Edits = SmallVec<[TreeEdit; 2]>;

/// Plan the edits that insert the navigation for `document`.
///
/// `items` is the full member list; the membership rule of the effective
/// options decides which of them are listed. `path` is exposed to the
/// template only in external or landing-page mode.
pub fn plan_edits(
    document: &Document,
    tree: &Tree,
    options: &EffectiveOptions,
    items: &[SeriesItem],
    path: Option<&str>,
) -> Edits {
    let mut edits = Edits::new();
    let Some(name) = options.resolvers.series_name(document) else {
        return edits;
    };

    let render = &options.render;
    let listed = render.membership().select(items, document);
    let slug = if render.uses_landing_page() { path } else { None };

    let fragment = |placeholder: &str| {
        Node::html(render.template.render(&TemplateContext {
            placeholder,
            name: &name,
            slug,
            items: &listed,
            options,
            document,
        }))
    };

    match &render.placeholder {
        Placeholder::Top => edits.push(TreeEdit::Prepend(fragment("top"))),
        Placeholder::Bottom => edits.push(TreeEdit::Append(fragment("bottom"))),
        Placeholder::Both => {
            edits.push(TreeEdit::Prepend(fragment("top")));
            edits.push(TreeEdit::Append(fragment("bottom")));
        }
        Placeholder::Custom(tag) => {
            let marker = render.placeholder.marker();
            if let Some(index) = marker.and_then(|marker| find_marker(tree, &marker)) {
                edits.push(TreeEdit::Replace {
                    index,
                    node: fragment(tag.as_str()),
                });
            }
        }
    }
    edits
}

/// Index of the first top-level child whose text is the marker.
///
/// The match is looser than exact equality: surrounding whitespace is
/// trimmed and ASCII case is ignored, since placeholders are lower-cased
/// when options are resolved. `<!-- TOC -->` therefore matches `<!-- toc -->`.
fn find_marker(tree: &Tree, marker: &str) -> Option<usize> {
    tree.children.iter().position(|child| {
        child
            .value
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(marker))
    })
}

/// Render the navigation into `tree`.
///
/// Returns the input tree itself when nothing is inserted.
pub fn render<'t>(
    document: &Document,
    tree: &'t Tree,
    options: &EffectiveOptions,
    items: &[SeriesItem],
    path: Option<&str>,
) -> Cow<'t, Tree> {
    let edits = plan_edits(document, tree, options, items, path);
    tree.apply(&edits)
}
