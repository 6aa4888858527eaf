//! Identifier derivation for records.
//!
//! Name-identified kinds use [`slugify`]; time-identified kinds use
//! [`timestamp_id`] or [`dated_slug`] so that lexical order matches
//! chronological order.

use chrono::{NaiveDate, NaiveTime};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Slug produced for names that contain nothing usable.
pub const EMPTY_SLUG: &str = "unnamed";

/// Converts a human-entered name to a URL- and filesystem-safe slug.
///
/// This function:
/// - Converts to lowercase
/// - Normalizes Unicode using NFD and removes combining marks (accents)
/// - Collapses every run of whitespace and punctuation into a single hyphen
/// - Trims leading/trailing hyphens
/// - Returns "unnamed" for input with no alphanumeric characters
///
/// Non-Latin letters pass through untouched. The function is idempotent.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }

        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Returns true when the name has at least one character that survives slugging.
pub fn has_identity(name: &str) -> bool {
    name.chars().any(char::is_alphanumeric)
}

/// `YYYYMMDD-HHMMSS`, used for workouts.
pub fn timestamp_id(date: NaiveDate, time: NaiveTime) -> String {
    format!("{}-{}", date.format("%Y%m%d"), time.format("%H%M%S"))
}

/// `YYYYMMDD-{slug}`, used for activities: one per name per day.
pub fn dated_slug(date: NaiveDate, name: &str) -> String {
    format!("{}-{}", date.format("%Y%m%d"), slugify(name))
}
