//! Field-extraction strategies.
//!
//! Each resolver maps a [`Document`] to a primitive value. The strategy is
//! picked once, while options are resolved:
//!
//! | Strategy          | Source                                  |
//! |-------------------|-----------------------------------------|
//! | [`MetadataField`] | built-in default, or `{ field = "..." }`|
//! | closure           | supplied programmatically by the host   |
//!
//! Series names are turned into URL segments by a [`Slugify`] strategy.

use crate::{document::Document, path::kebab_case};
use serde_json::Value;
use std::{borrow::Cow, fmt};

// ============================================================================
// Document resolvers
// ============================================================================

/// Extracts one value from a document.
pub trait Resolve: Send + Sync {
    fn resolve(&self, document: &Document) -> Value;

    /// Short description used in `Debug` output.
    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("custom")
    }
}

impl<F> Resolve for F
where
    F: Fn(&Document) -> Value + Send + Sync,
{
    fn resolve(&self, document: &Document) -> Value {
        self(document)
    }
}

impl fmt::Debug for dyn Resolve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resolve({})", self.describe())
    }
}

/// Reads a metadata field verbatim; absent fields resolve to `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField(String);

impl MetadataField {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl Resolve for MetadataField {
    fn resolve(&self, document: &Document) -> Value {
        document.field(&self.0).cloned().unwrap_or(Value::Null)
    }

    fn describe(&self) -> Cow<'_, str> {
        Cow::Owned(format!("metadata.{}", self.0))
    }
}

// ============================================================================
// Series slug
// ============================================================================

/// Turns a series name into a path segment.
///
/// Returns a JSON value because host closures are free to return anything;
/// non-strings are rejected later by the path normalizer.
pub trait Slugify: Send + Sync {
    fn slugify(&self, name: &str) -> Value;

    fn describe(&self) -> Cow<'_, str> {
        Cow::Borrowed("custom")
    }
}

impl<F> Slugify for F
where
    F: Fn(&str) -> Value + Send + Sync,
{
    fn slugify(&self, name: &str) -> Value {
        self(name)
    }
}

impl fmt::Debug for dyn Slugify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slugify({})", self.describe())
    }
}

/// Built-in slug styles, selectable by name from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlugStyle {
    /// `"My Title Series"` → `"my-title-series"` (default).
    #[default]
    Kebab,
    /// Keep the series name as-is.
    Verbatim,
}

impl SlugStyle {
    /// Look up a style by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kebab" | "kebab-case" => Some(Self::Kebab),
            "verbatim" | "none" => Some(Self::Verbatim),
            _ => None,
        }
    }
}

impl Slugify for SlugStyle {
    fn slugify(&self, name: &str) -> Value {
        match self {
            Self::Kebab => Value::String(kebab_case(name)),
            Self::Verbatim => Value::String(name.to_owned()),
        }
    }

    fn describe(&self) -> Cow<'_, str> {
        match self {
            Self::Kebab => Cow::Borrowed("kebab"),
            Self::Verbatim => Cow::Borrowed("verbatim"),
        }
    }
}
