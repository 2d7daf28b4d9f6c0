//! Built-in option values.
//!
//! Raw user options are merged over [`raw`] before validation.

use super::{OptionValue, RawOptions, RawRender, RawResolvers};
use super::resolver::{MetadataField, SlugStyle};
use serde_json::Value;
use std::sync::Arc;

pub const MODE: &str = "inline";
pub const PLACEHOLDER: &str = "bottom";
pub const USE_LANDING_PAGE: bool = false;

pub mod fields {
    pub const SLUG: &str = "slug";
    pub const DATE: &str = "date";
    pub const DRAFT: &str = "draft";
    pub const ORDER: &str = "order";
    pub const SERIES: &str = "series";
}

fn field(key: &str) -> Option<OptionValue> {
    Some(OptionValue::Resolver(Arc::new(MetadataField::new(key))))
}

/// The default raw option set.
///
/// `template` is left empty: the mode-appropriate default is chosen after
/// validation, once the landing-page mode is known.
pub fn raw() -> RawOptions {
    RawOptions {
        resolvers: RawResolvers {
            slug: field(fields::SLUG),
            date: field(fields::DATE),
            draft: field(fields::DRAFT),
            order: field(fields::ORDER),
            series: field(fields::SERIES),
            to_slug: Some(OptionValue::Slugify(Arc::new(SlugStyle::default()))),
        },
        render: RawRender {
            mode: Some(OptionValue::Data(Value::from(MODE))),
            placeholder: Some(OptionValue::Data(Value::from(PLACEHOLDER))),
            template: None,
            use_landing_page: Some(OptionValue::Data(Value::Bool(USE_LANDING_PAGE))),
            landing_page_component: None,
            landing_page_path_prefix: None,
        },
    }
}
