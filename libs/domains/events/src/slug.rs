//! Slug validation and derivation

use crate::error::{EventError, Result};
use regex::Regex;
use std::sync::LazyLock;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"));

/// Validate a slug taken from a request path.
///
/// A blank slug is missing. Anything else must match the pattern exactly,
/// so surrounding whitespace makes it invalid.
pub fn validate_slug(raw: &str) -> Result<&str> {
    if raw.trim().is_empty() {
        return Err(EventError::MissingSlug);
    }
    if !SLUG_PATTERN.is_match(raw) {
        return Err(EventError::InvalidSlug(raw.to_string()));
    }
    Ok(raw)
}

/// Derive a slug from free text such as an event title.
///
/// Lowercases ASCII letters, collapses every run of other characters into one
/// hyphen and trims hyphens from both ends. May return an empty string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
