//! Default resolution and input validation
//!
//! Both operate on a field's category list in encoder order. They never fail:
//! a degenerate list still yields a value so the service stays available.

use crate::field::{FALLBACK_DEFAULT, SENTINEL};
use serde::Serialize;

/// First non-sentinel category, or [`FALLBACK_DEFAULT`] if there is none.
pub fn resolve_default<S: AsRef<str>>(categories: &[S]) -> String {
    first_valid(categories)
        .unwrap_or(FALLBACK_DEFAULT)
        .to_string()
}

fn first_valid<S: AsRef<str>>(categories: &[S]) -> Option<&str> {
    categories
        .iter()
        .map(|c| c.as_ref().trim())
        .find(|c| *c != SENTINEL)
}

/// Result of validating one raw value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// The value to feed the encoder
    pub value: String,
    /// Set when the raw value was replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<String>,
}

impl Validation {
    pub fn is_substituted(&self) -> bool {
        self.replaced.is_some()
    }
}

/// Validate `raw` against a category list, keeping the substitution detail.
///
/// The raw value is trimmed. The sentinel or a non-member is replaced by the
/// first non-sentinel category; if the list holds only sentinels the first raw
/// element is used, and an empty list gives [`FALLBACK_DEFAULT`].
pub fn check<S: AsRef<str>>(raw: &str, categories: &[S]) -> Validation {
    let normalized = raw.trim();

    let is_member = normalized != SENTINEL
        && categories.iter().any(|c| c.as_ref().trim() == normalized);
    if is_member {
        return Validation {
            value: normalized.to_string(),
            replaced: None,
        };
    }

    let substitute = first_valid(categories)
        .or_else(|| categories.first().map(|c| c.as_ref().trim()))
        .unwrap_or(FALLBACK_DEFAULT);

    Validation {
        value: substitute.to_string(),
        replaced: Some(raw.to_string()),
    }
}

/// Validate `raw` against a category list
pub fn validate<S: AsRef<str>>(raw: &str, categories: &[S]) -> String {
    check(raw, categories).value
}
