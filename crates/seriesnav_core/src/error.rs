//! Error types for series navigation.

use thiserror::Error;

/// Errors raised while resolving options or normalizing series paths.
///
/// A document without a series is not an error: it is skipped silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// A recognized option has the wrong kind, or a mode-specific
    /// required option is missing.
    #[error("`{field}` must be {expected}")]
    Configuration {
        field: String,
        expected: &'static str,
    },

    /// An option that is not part of the recognized shape.
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    /// A helper received an argument of the wrong kind.
    #[error("`{argument}` must be {expected}")]
    InvalidArgument {
        argument: &'static str,
        expected: &'static str,
    },
}

impl SeriesError {
    pub(crate) fn config(field: impl Into<String>, expected: &'static str) -> Self {
        Self::Configuration {
            field: field.into(),
            expected,
        }
    }

    /// Whether this error belongs to the configuration class
    /// (fatal to the build step, raised before any rendering).
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. } | Self::UnknownOption(_))
    }
}

pub type Result<T> = std::result::Result<T, SeriesError>;
