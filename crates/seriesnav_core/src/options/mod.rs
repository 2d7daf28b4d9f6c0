//! Option resolution and validation.
//!
//! # Sections
//!
//! | Section       | Fields                                                        |
//! |---------------|---------------------------------------------------------------|
//! | `resolvers`   | `slug`, `date`, `draft`, `order`, `series`, `to_slug`         |
//! | `render`      | `mode`, `placeholder`, `template`, `use_landing_page`,        |
//! |               | `landing_page_component`, `landing_page_path_prefix`          |
//!
//! # Flow
//!
//! ```text
//! RawOptions (user) ──┐
//!                     ├── merge (right-biased, null never overrides)
//! defaults::raw() ────┘        │
//!                              ▼
//!                        validate every field
//!                              │
//!                              ├── Err(SeriesError::Configuration)  (nothing rendered)
//!                              └── Ok(EffectiveOptions)             (immutable)
//! ```
//!
//! # Example (TOML)
//!
//! ```toml
//! [series.resolvers]
//! slug = { field = "permalink" }
//! to_slug = "kebab"
//!
//! [series.render]
//! placeholder = "both"
//! use_landing_page = true
//! landing_page_component = "templates/series.html"
//! landing_page_path_prefix = "series"
//! ```
//!
//! Keys may also be spelled in camelCase (`useLandingPage`, `toSlug`).

pub mod defaults;
pub mod resolver;

use crate::{
    coerce,
    collect::Membership,
    document::Document,
    error::{Result, SeriesError},
    path::resolve_series_path,
    template::{ExternalTemplate, InlineTemplate, Template},
};
use resolver::{MetadataField, Resolve, SlugStyle, Slugify};
use serde_json::{Map, Value};
use std::sync::Arc;

// ============================================================================
// Raw options
// ============================================================================

/// One user-supplied option: plain data, or a callable strategy.
#[derive(Debug, Clone)]
pub enum OptionValue {
    Data(Value),
    Resolver(Arc<dyn Resolve>),
    Slugify(Arc<dyn Slugify>),
    Template(Arc<dyn Template>),
}

impl OptionValue {
    pub fn resolver(resolver: impl Resolve + 'static) -> Self {
        Self::Resolver(Arc::new(resolver))
    }

    pub fn slugify(slugify: impl Slugify + 'static) -> Self {
        Self::Slugify(Arc::new(slugify))
    }

    pub fn template(template: impl Template + 'static) -> Self {
        Self::Template(Arc::new(template))
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Data(Value::Null))
    }
}

impl From<Value> for OptionValue {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Data(Value::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Data(Value::Bool(value))
    }
}

/// Unvalidated options, as supplied by the user.
///
/// Every field is optional; absent and `null` fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    pub resolvers: RawResolvers,
    pub render: RawRender,
}

/// `resolvers` section.
#[derive(Debug, Clone, Default)]
pub struct RawResolvers {
    pub slug: Option<OptionValue>,
    pub date: Option<OptionValue>,
    pub draft: Option<OptionValue>,
    pub order: Option<OptionValue>,
    pub series: Option<OptionValue>,
    pub to_slug: Option<OptionValue>,
}

/// `render` section.
#[derive(Debug, Clone, Default)]
pub struct RawRender {
    pub mode: Option<OptionValue>,
    pub placeholder: Option<OptionValue>,
    pub template: Option<OptionValue>,
    pub use_landing_page: Option<OptionValue>,
    pub landing_page_component: Option<OptionValue>,
    pub landing_page_path_prefix: Option<OptionValue>,
}

/// Right-biased pick: `over` wins unless it is absent or `null`.
fn pick(base: Option<OptionValue>, over: Option<OptionValue>) -> Option<OptionValue> {
    match over {
        Some(value) if !value.is_null() => Some(value),
        _ => base,
    }
}

/// Normalize a key so that `use_landing_page` and `useLandingPage` match.
fn canonical_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// View a section as a table; `null` is an empty section.
fn section<'a>(name: &str, value: &'a Value) -> Result<Option<&'a Map<String, Value>>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(table) => Ok(Some(table)),
        _ => Err(SeriesError::config(name, "a table")),
    }
}

impl RawOptions {
    /// Convert a configuration table (e.g. the `[series]` TOML table).
    ///
    /// Unknown keys are rejected. Leaf kinds are not checked here;
    /// that happens in [`resolve`].
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut raw = Self::default();
        let Some(table) = section("options", value)? else {
            return Ok(raw);
        };

        for (key, value) in table {
            match canonical_key(key).as_str() {
                "resolvers" => raw.resolvers = RawResolvers::from_value(value)?,
                "render" => raw.render = RawRender::from_value(value)?,
                _ => return Err(SeriesError::UnknownOption(key.clone())),
            }
        }
        Ok(raw)
    }

    /// Merge `over` into `self`, field by field.
    pub fn merge(self, over: RawOptions) -> Self {
        Self {
            resolvers: self.resolvers.merge(over.resolvers),
            render: self.render.merge(over.render),
        }
    }
}

impl RawResolvers {
    fn from_value(value: &Value) -> Result<Self> {
        let mut raw = Self::default();
        let Some(table) = section("resolvers", value)? else {
            return Ok(raw);
        };

        for (key, value) in table {
            let slot = match canonical_key(key).as_str() {
                "slug" => &mut raw.slug,
                "date" => &mut raw.date,
                "draft" => &mut raw.draft,
                "order" => &mut raw.order,
                "series" => &mut raw.series,
                "toslug" => &mut raw.to_slug,
                _ => return Err(SeriesError::UnknownOption(format!("resolvers.{key}"))),
            };
            *slot = Some(OptionValue::Data(value.clone()));
        }
        Ok(raw)
    }

    fn merge(self, over: Self) -> Self {
        Self {
            slug: pick(self.slug, over.slug),
            date: pick(self.date, over.date),
            draft: pick(self.draft, over.draft),
            order: pick(self.order, over.order),
            series: pick(self.series, over.series),
            to_slug: pick(self.to_slug, over.to_slug),
        }
    }
}

impl RawRender {
    fn from_value(value: &Value) -> Result<Self> {
        let mut raw = Self::default();
        let Some(table) = section("render", value)? else {
            return Ok(raw);
        };

        for (key, value) in table {
            let slot = match canonical_key(key).as_str() {
                "mode" => &mut raw.mode,
                "placeholder" => &mut raw.placeholder,
                "template" => &mut raw.template,
                "uselandingpage" => &mut raw.use_landing_page,
                "landingpagecomponent" => &mut raw.landing_page_component,
                "landingpagepathprefix" => &mut raw.landing_page_path_prefix,
                _ => return Err(SeriesError::UnknownOption(format!("render.{key}"))),
            };
            *slot = Some(OptionValue::Data(value.clone()));
        }
        Ok(raw)
    }

    fn merge(self, over: Self) -> Self {
        Self {
            mode: pick(self.mode, over.mode),
            placeholder: pick(self.placeholder, over.placeholder),
            template: pick(self.template, over.template),
            use_landing_page: pick(self.use_landing_page, over.use_landing_page),
            landing_page_component: pick(self.landing_page_component, over.landing_page_component),
            landing_page_path_prefix: pick(
                self.landing_page_path_prefix,
                over.landing_page_path_prefix,
            ),
        }
    }
}

// ============================================================================
// Effective options
// ============================================================================

/// Where the navigation goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// List the series inside the document.
    #[default]
    Inline,
    /// Link to a standalone series page.
    External,
}

impl RenderMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::External => "external",
        }
    }
}

/// Insertion strategy for rendered fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Top,
    Bottom,
    Both,
    /// Replace an in-content marker built from this (lower-cased) string.
    Custom(String),
}

impl Placeholder {
    /// Parse a placeholder, lower-casing it first.
    pub fn parse(value: &str) -> Self {
        let value = value.to_lowercase();
        let builtin = match value.trim() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "both" => Some(Self::Both),
            _ => None,
        };
        builtin.unwrap_or(Self::Custom(value))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Both => "both",
            Self::Custom(custom) => custom,
        }
    }

    /// The in-content marker for a custom placeholder.
    ///
    /// A placeholder that already is an HTML comment is its own marker;
    /// anything else is wrapped as `<!-- placeholder -->`.
    pub fn marker(&self) -> Option<String> {
        let Self::Custom(custom) = self else {
            return None;
        };
        let custom = custom.trim();
        if custom.starts_with("<!--") && custom.ends_with("-->") {
            Some(custom.to_owned())
        } else {
            Some(format!("<!-- {custom} -->"))
        }
    }
}

/// Validated resolver set.
#[derive(Debug, Clone)]
pub struct Resolvers {
    pub slug: Arc<dyn Resolve>,
    pub date: Arc<dyn Resolve>,
    pub draft: Arc<dyn Resolve>,
    pub order: Arc<dyn Resolve>,
    pub series: Arc<dyn Resolve>,
    pub to_slug: Arc<dyn Slugify>,
}

impl Resolvers {
    /// The document's series name, if it belongs to one.
    pub fn series_name(&self, document: &Document) -> Option<String> {
        coerce::series_name(&self.series.resolve(document))
    }
}

/// Validated render configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub placeholder: Placeholder,
    pub template: Arc<dyn Template>,
    pub use_landing_page: bool,
    pub landing_page_component: Option<String>,
    pub landing_page_path_prefix: Option<String>,
}

impl RenderOptions {
    /// Whether fragments link to a standalone series page.
    ///
    /// External mode links to the page even when the host builds it itself;
    /// pages are only generated when `use_landing_page` is set.
    pub fn uses_landing_page(&self) -> bool {
        self.use_landing_page || self.mode == RenderMode::External
    }

    /// Which members a rendered fragment lists.
    pub fn membership(&self) -> Membership {
        if self.uses_landing_page() {
            Membership::All
        } else {
            Membership::Siblings
        }
    }
}

/// Fully resolved options. Immutable once built.
#[derive(Debug, Clone)]
pub struct EffectiveOptions {
    pub resolvers: Resolvers,
    pub render: RenderOptions,
}

impl EffectiveOptions {
    /// Normalized path of a series' landing page.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the slug strategy does not return a string.
    pub fn series_path(&self, name: &str, global_prefix: Option<&str>) -> Result<String> {
        let slug = self.resolvers.to_slug.slugify(name);
        resolve_series_path(
            &slug,
            global_prefix,
            self.render.landing_page_path_prefix.as_deref(),
        )
    }
}

/// Merge `raw` over the defaults and validate the result.
///
/// `None` and an empty [`RawOptions`] resolve identically. The raw input is
/// never modified.
///
/// # Errors
///
/// A [`SeriesError::Configuration`] naming the first offending field.
pub fn resolve(raw: Option<&RawOptions>) -> Result<EffectiveOptions> {
    let merged = match raw {
        Some(raw) => defaults::raw().merge(raw.clone()),
        None => defaults::raw(),
    };
    validate(merged)
}

fn validate(raw: RawOptions) -> Result<EffectiveOptions> {
    let RawOptions { resolvers, render } = raw;

    let mode = match &render.mode {
        Some(OptionValue::Data(Value::String(mode))) => match mode.to_lowercase().trim() {
            "inline" => RenderMode::Inline,
            "external" => RenderMode::External,
            _ => return Err(SeriesError::config("render.mode", "`inline` or `external`")),
        },
        _ => return Err(SeriesError::config("render.mode", "a string")),
    };

    let placeholder = match &render.placeholder {
        Some(OptionValue::Data(Value::String(placeholder))) => Placeholder::parse(placeholder),
        _ => return Err(SeriesError::config("render.placeholder", "a string")),
    };

    let template = match render.template {
        None => None,
        Some(OptionValue::Template(template)) => Some(template),
        Some(_) => return Err(SeriesError::config("render.template", "a template")),
    };

    let use_landing_page = match &render.use_landing_page {
        Some(OptionValue::Data(Value::Bool(flag))) => *flag,
        _ => return Err(SeriesError::config("render.use_landing_page", "a boolean")),
    };

    let resolvers = Resolvers {
        slug: document_resolver("resolvers.slug", resolvers.slug)?,
        date: document_resolver("resolvers.date", resolvers.date)?,
        draft: document_resolver("resolvers.draft", resolvers.draft)?,
        order: document_resolver("resolvers.order", resolvers.order)?,
        series: document_resolver("resolvers.series", resolvers.series)?,
        to_slug: slug_resolver(resolvers.to_slug)?,
    };

    let (landing_page_component, landing_page_path_prefix) = if use_landing_page {
        let component = match &render.landing_page_component {
            Some(OptionValue::Data(Value::String(component))) if !component.trim().is_empty() => {
                component.clone()
            }
            _ => {
                return Err(SeriesError::config(
                    "render.landing_page_component",
                    "a non-empty string",
                ));
            }
        };
        let prefix = match &render.landing_page_path_prefix {
            None => None,
            Some(OptionValue::Data(Value::String(prefix))) => Some(prefix.clone()),
            Some(_) => {
                return Err(SeriesError::config("render.landing_page_path_prefix", "a string"));
            }
        };
        (Some(component), prefix)
    } else {
        // Not type-checked unless landing pages are generated.
        (
            string_data(render.landing_page_component.as_ref()),
            string_data(render.landing_page_path_prefix.as_ref()),
        )
    };

    let template: Arc<dyn Template> = match template {
        Some(template) => template,
        None if use_landing_page || mode == RenderMode::External => Arc::new(ExternalTemplate),
        None => Arc::new(InlineTemplate),
    };

    Ok(EffectiveOptions {
        resolvers,
        render: RenderOptions {
            mode,
            placeholder,
            template,
            use_landing_page,
            landing_page_component,
            landing_page_path_prefix,
        },
    })
}

fn string_data(value: Option<&OptionValue>) -> Option<String> {
    match value {
        Some(OptionValue::Data(Value::String(s))) => Some(s.clone()),
        _ => None,
    }
}

fn document_resolver(field: &str, value: Option<OptionValue>) -> Result<Arc<dyn Resolve>> {
    match value {
        Some(OptionValue::Resolver(resolver)) => Ok(resolver),
        Some(OptionValue::Data(Value::Object(table))) => match table.get("field") {
            Some(Value::String(key)) if !key.is_empty() => {
                Ok(Arc::new(MetadataField::new(key.as_str())))
            }
            _ => Err(SeriesError::config(field, "a resolver")),
        },
        _ => Err(SeriesError::config(field, "a resolver")),
    }
}

fn slug_resolver(value: Option<OptionValue>) -> Result<Arc<dyn Slugify>> {
    const FIELD: &str = "resolvers.to_slug";
    match value {
        Some(OptionValue::Slugify(slugify)) => Ok(slugify),
        Some(OptionValue::Data(Value::String(name))) => SlugStyle::from_name(&name)
            .map(|style| Arc::new(style) as Arc<dyn Slugify>)
            .ok_or_else(|| SeriesError::config(FIELD, "a slug function")),
        _ => Err(SeriesError::config(FIELD, "a slug function")),
    }
}
