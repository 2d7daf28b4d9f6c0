//! Host-owned documents and their parsed block trees.
//!
//! # Architecture
//!
//! ```text
//! Document ──► metadata (front matter, read through resolvers only)
//!
//! Tree (root Node)
//!     ├── Node { type: "heading", .. }
//!     ├── Node { type: "html", value: "<!-- series -->" }
//!     └── Node { type: "paragraph", .. }
//!
//! plan edits ──► [TreeEdit] ──► Tree::apply() ──► Cow<Tree>
//!                                                  ├── Borrowed (no edits: same tree)
//!                                                  └── Owned (edited copy)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Kind of document that can take part in a series.
pub const CONTENT_KIND: &str = "markdown";

/// Node type used for rendered navigation fragments.
pub const HTML_NODE: &str = "html";

fn default_kind() -> String {
    CONTENT_KIND.into()
}

// ============================================================================
// Document
// ============================================================================

/// A document known to the host build.
///
/// Metadata is never mutated here; resolvers only read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identity within one build.
    pub id: String,
    /// Content kind; only [`CONTENT_KIND`] documents join series.
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Host content digest.
    #[serde(default)]
    pub fingerprint: String,
    /// Front matter fields (`title`, `date`, `draft`, `order`, `series`, `slug`, ...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    /// Create a content document with the given metadata.
    pub fn new(id: impl Into<String>, metadata: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            kind: default_kind(),
            fingerprint: String::new(),
            metadata,
        }
    }

    /// Builder-style override of the document kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Look up a metadata field. `null` counts as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key).filter(|v| !v.is_null())
    }

    /// The `title` metadata field, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }

    /// Whether this document is of the kind that joins series.
    pub fn is_content(&self) -> bool {
        self.kind == CONTENT_KIND
    }
}

// ============================================================================
// Tree
// ============================================================================

/// One block of a parsed document tree (mdast-like).
///
/// Attributes this crate does not know about are kept in `extra`
/// so that a host tree round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The root node of a document.
pub type Tree = Node;

impl Node {
    /// A root node with the given children.
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            kind: "root".into(),
            value: None,
            children,
            extra: Map::new(),
        }
    }

    /// A leaf node carrying raw text.
    pub fn leaf(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: Some(value.into()),
            children: Vec::new(),
            extra: Map::new(),
        }
    }

    /// A rendered HTML fragment.
    pub fn html(value: impl Into<String>) -> Self {
        Self::leaf(HTML_NODE, value)
    }

    /// Apply planned edits, returning the input unchanged when there are none.
    ///
    /// Replacements are applied before insertions so that planned
    /// indices refer to the original children.
    pub fn apply(&self, edits: &[TreeEdit]) -> Cow<'_, Node> {
        if edits.is_empty() {
            return Cow::Borrowed(self);
        }

        let mut tree = self.clone();
        for edit in edits {
            if let TreeEdit::Replace { index, node } = edit
                && let Some(slot) = tree.children.get_mut(*index)
            {
                *slot = node.clone();
            }
        }
        for edit in edits {
            match edit {
                TreeEdit::Prepend(node) => tree.children.insert(0, node.clone()),
                TreeEdit::Append(node) => tree.children.push(node.clone()),
                TreeEdit::Replace { .. } => {}
            }
        }
        Cow::Owned(tree)
    }
}

/// A single change to the top-level children of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEdit {
    /// Insert as the new first child.
    Prepend(Node),
    /// Insert as the new last child.
    Append(Node),
    /// Replace the child at `index` (of the original tree).
    Replace { index: usize, node: Node },
}
