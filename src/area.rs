//! Primary functional area resolution.
//!
//! Unlike role and topic tagging, a page gets exactly one functional area.
//! A standalone match in the title wins outright; otherwise the earliest
//! standalone match in the body wins.

use crate::matcher::VocabularyMatcher;
use crate::result::Field;

/// Report label for pages with no area match.
pub const NO_AREA_FOUND: &str = "No Area Found";

/// Which part of the page decided the area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaSource {
    Title,
    Body,
}

/// Resolve the single primary area for a page.
///
/// Both tiers pick the earliest match by offset, longer term first on equal
/// offsets, then vocabulary order. Empty title and body yield `NotSearched`.
#[must_use]
pub fn resolve(matcher: &VocabularyMatcher, title: &str, body: &str) -> Field<String> {
    match resolve_with_source(matcher, title, body) {
        Field::Value((area, _)) => Field::Value(area),
        Field::NotFound => Field::NotFound,
        Field::NotSearched => Field::NotSearched,
        Field::FetchError => Field::FetchError,
    }
}

/// [`resolve`], also reporting which tier produced the winner.
#[must_use]
pub fn resolve_with_source(
    matcher: &VocabularyMatcher,
    title: &str,
    body: &str,
) -> Field<(String, AreaSource)> {
    if title.trim().is_empty() && body.trim().is_empty() {
        return Field::NotSearched;
    }

    let terms = matcher.vocabulary().terms();
    let winner = matcher
        .earliest(title)
        .map(|(idx, _)| (idx, AreaSource::Title))
        .or_else(|| matcher.earliest(body).map(|(idx, _)| (idx, AreaSource::Body)));

    match winner {
        Some((idx, source)) => Field::Value((terms[idx].clone(), source)),
        None => Field::NotFound,
    }
}
