//! Series path normalization and slug generation.
//!
//! # Path shape
//!
//! ```text
//! global prefix   plugin prefix   slug
//!   "/blog/"   +    "/series"  +  "my-title-series"
//!      │               │               │
//!   strip one      strip one       strip one
//!   lead/trail     lead/trail      lead/trail
//!      └──────────── join("/") ────────┘
//!                      │
//!          "/blog/series/my-title-series"
//! ```
//!
//! Prefixes that are empty or blank once their slashes are stripped (`""`,
//! `"/"`, `"//"`) are skipped, so the output never contains `//`.

use crate::error::{Result, SeriesError};
use deunicode::deunicode;
use serde_json::Value;
use smallvec::SmallVec;

/// Strip at most one leading and one trailing `/`.
fn trim_slashes(segment: &str) -> &str {
    let segment = segment.strip_prefix('/').unwrap_or(segment);
    segment.strip_suffix('/').unwrap_or(segment)
}

/// Build the absolute path of a series landing page.
///
/// # Errors
///
/// `InvalidArgument` when `name` is not a string.
pub fn resolve_series_path(
    name: &Value,
    global_prefix: Option<&str>,
    plugin_prefix: Option<&str>,
) -> Result<String> {
    let Value::String(name) = name else {
        return Err(SeriesError::InvalidArgument {
            argument: "name",
            expected: "a string",
        });
    };

    let mut segments: SmallVec<[&str; 3]> = SmallVec::new();
    for prefix in [global_prefix, plugin_prefix].into_iter().flatten() {
        let segment = trim_slashes(prefix.trim());
        if !segment.trim().is_empty() {
            segments.push(segment);
        }
    }
    segments.push(trim_slashes(name));

    Ok(format!("/{}", segments.join("/")))
}

// ============================================================================
// Kebab case
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
}

fn class_of(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else {
        CharClass::Lower
    }
}

/// Convert text to `kebab-case`.
///
/// Non-ASCII letters are transliterated first. Words split at
/// non-alphanumeric characters, at lower→upper transitions, before the
/// last capital of an acronym (`XMLHttp` → `xml-http`) and between
/// letters and digits.
pub fn kebab_case(input: &str) -> String {
    let ascii = deunicode(input);
    let mut words: Vec<String> = Vec::new();

    for chunk in ascii.split(|c: char| !c.is_ascii_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut word = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
                let (before, here) = (class_of(prev), class_of(c));
                let next_lower = chars
                    .get(i + 1)
                    .is_some_and(|&n| class_of(n) == CharClass::Lower);
                let boundary = match (before, here) {
                    (CharClass::Lower, CharClass::Upper) => true,
                    (CharClass::Upper, CharClass::Upper) => next_lower,
                    (CharClass::Digit, CharClass::Digit) => false,
                    (CharClass::Digit, _) | (_, CharClass::Digit) => true,
                    _ => false,
                };
                if boundary && !word.is_empty() {
                    words.push(std::mem::take(&mut word));
                }
            }
            word.push(c.to_ascii_lowercase());
        }
        if !word.is_empty() {
            words.push(word);
        }
    }

    words.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_without_prefixes() {
        assert_eq!(
            resolve_series_path(&json!("my-title-series"), None, None).unwrap(),
            "/my-title-series"
        );
    }

    #[test]
    fn test_path_with_prefixes() {
        let name = json!("my-title-series");
        assert_eq!(
            resolve_series_path(&name, None, Some("series")).unwrap(),
            "/series/my-title-series"
        );
        assert_eq!(
            resolve_series_path(&name, Some("/blog/"), Some("/series/")).unwrap(),
            "/blog/series/my-title-series"
        );
    }

    #[test]
    fn test_path_skips_blank_prefixes() {
        let name = json!("/name/");
        assert_eq!(
            resolve_series_path(&name, Some(""), Some("  ")).unwrap(),
            "/name"
        );
    }

    #[test]
    fn test_path_skips_slash_only_prefixes() {
        let name = json!("name");
        assert_eq!(resolve_series_path(&name, Some("/"), None).unwrap(), "/name");
        assert_eq!(
            resolve_series_path(&name, Some("/"), Some("//")).unwrap(),
            "/name"
        );
        assert_eq!(
            resolve_series_path(&name, Some(" / "), Some("series")).unwrap(),
            "/series/name"
        );
    }

    #[test]
    fn test_path_strips_only_one_slash() {
        assert_eq!(
            resolve_series_path(&json!("//name"), Some("//root"), None).unwrap(),
            "//root//name"
        );
    }

    #[test]
    fn test_path_rejects_non_string_name() {
        for name in [json!(1), json!(null), json!(["a"])] {
            let err = resolve_series_path(&name, None, None).unwrap_err();
            assert!(matches!(err, SeriesError::InvalidArgument { argument: "name", .. }));
        }
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("My Title Series"), "my-title-series");
        assert_eq!(kebab_case("fooBar"), "foo-bar");
        assert_eq!(kebab_case("__FOO_BAR__"), "foo-bar");
        assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
        assert_eq!(kebab_case("Part 2"), "part-2");
        assert_eq!(kebab_case("rust2024"), "rust-2024");
        assert_eq!(kebab_case("Café Crème"), "cafe-creme");
        assert_eq!(kebab_case(""), "");
    }
}
