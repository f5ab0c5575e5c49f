//! Standalone-word vocabulary matching.
//!
//! A term matches only where it stands on its own: the characters directly
//! before and after the (case-insensitive) occurrence must be absent,
//! whitespace, or one of `( ) , . " '`. "view" therefore never matches
//! inside "overview" or "Viewer".

use std::collections::HashSet;
use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::patterns::WHITESPACE_NORMALIZE;
use crate::result::Field;
use crate::vocabulary::Vocabulary;

/// Punctuation accepted as a word boundary next to a match.
const BOUNDARY_PUNCTUATION: [char; 6] = ['(', ')', ',', '.', '"', '\''];

/// Whether a neighbouring character (or the text edge) bounds a match.
#[inline]
fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| c.is_whitespace() || BOUNDARY_PUNCTUATION.contains(&c))
}

/// Compile a literal, case-insensitive pattern for one term.
///
/// Whitespace inside the term matches any whitespace run in the text.
fn term_pattern(term: &str) -> Result<Regex, regex::Error> {
    let pattern = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Key under which two terms match exactly the same text.
fn term_key(term: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(term, " ").to_lowercase()
}

/// Byte spans of every standalone occurrence of `pattern` in `text`.
///
/// Accepted spans never overlap. A rejected candidate does not hide an
/// overlapping later candidate: the scan resumes one char after its start.
pub fn standalone_spans<'t>(pattern: &'t Regex, text: &'t str) -> impl Iterator<Item = Range<usize>> + 't {
    let mut pos = 0;
    std::iter::from_fn(move || {
        while pos <= text.len() {
            let m = pattern.find_at(text, pos)?;
            if m.start() == m.end() {
                return None;
            }
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if is_boundary(before) && is_boundary(after) {
                pos = m.end();
                return Some(m.range());
            }
            let step = text[m.start()..].chars().next().map_or(1, char::len_utf8);
            pos = m.start() + step;
        }
        None
    })
}

/// Whether `term` occurs standalone anywhere in `text`.
///
/// Convenience for one-off checks; [`VocabularyMatcher`] compiles each term
/// once for repeated use.
#[must_use]
pub fn contains_standalone(text: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return false;
    }
    term_pattern(term).is_ok_and(|re| standalone_spans(&re, text).next().is_some())
}

/// Selection policy for multi-valued fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every term with at least one standalone match, in vocabulary order.
    #[default]
    All,
    /// The N most frequent terms; ties keep vocabulary order.
    TopN(usize),
}

/// A vocabulary with its terms compiled for standalone matching.
#[derive(Debug, Clone)]
pub struct VocabularyMatcher {
    vocabulary: Vocabulary,
    patterns: Vec<Option<Regex>>,
    longest_first: bool,
}

impl VocabularyMatcher {
    /// Compile every term of `vocabulary`.
    ///
    /// A term whose pattern cannot be compiled (only possible for absurdly
    /// long terms) is logged and never matches. A term repeating an earlier
    /// one (ignoring case and whitespace runs) never matches either, so each
    /// term is reported at most once under its first spelling.
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        let mut seen = HashSet::new();
        let patterns = vocabulary
            .terms()
            .iter()
            .map(|term| {
                if !seen.insert(term_key(term)) {
                    debug!(vocabulary = vocabulary.name(), term = %term, "duplicate term");
                    return None;
                }
                match term_pattern(term) {
                    Ok(re) => Some(re),
                    Err(err) => {
                        warn!(vocabulary = vocabulary.name(), term = %term, error = %err, "term skipped");
                        None
                    }
                }
            })
            .collect();
        Self {
            vocabulary,
            patterns,
            longest_first: true,
        }
    }

    /// Enable or disable longest-term-first span claiming for frequency
    /// counts (enabled by default).
    #[must_use]
    pub fn longest_first(mut self, enabled: bool) -> Self {
        self.longest_first = enabled;
        self
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Tag `text` according to `mode`.
    ///
    /// Empty text yields `NotSearched`; no matching term yields `NotFound`.
    #[must_use]
    pub fn find(&self, text: &str, mode: MatchMode) -> Field<Vec<String>> {
        if text.trim().is_empty() {
            return Field::NotSearched;
        }
        let terms = match mode {
            MatchMode::All => self.matching_terms(text),
            MatchMode::TopN(n) => self.top_terms(text, n),
        };
        if terms.is_empty() {
            Field::NotFound
        } else {
            Field::Value(terms)
        }
    }

    /// Terms with at least one standalone occurrence, in vocabulary order.
    #[must_use]
    pub fn matching_terms(&self, text: &str) -> Vec<String> {
        self.vocabulary
            .terms()
            .iter()
            .zip(&self.patterns)
            .filter(|(_, re)| re.as_ref().is_some_and(|re| standalone_spans(re, text).next().is_some()))
            .map(|(term, _)| term.clone())
            .collect()
    }

    /// Standalone occurrence count per term, indexed like the vocabulary.
    ///
    /// With longest-first enabled, longer terms claim their spans first and
    /// shorter terms do not count occurrences overlapping a claimed span.
    #[must_use]
    pub fn counts(&self, text: &str) -> Vec<usize> {
        let mut counts = vec![0; self.patterns.len()];
        if !self.longest_first {
            for (count, re) in counts.iter_mut().zip(&self.patterns) {
                *count = re.as_ref().map_or(0, |re| standalone_spans(re, text).count());
            }
            return counts;
        }

        let mut claimed: Vec<Range<usize>> = Vec::new();
        for idx in self.vocabulary.indices_by_length_desc() {
            let Some(re) = &self.patterns[idx] else {
                continue;
            };
            let spans: Vec<Range<usize>> = standalone_spans(re, text)
                .filter(|span| !claimed.iter().any(|c| c.start < span.end && span.start < c.end))
                .collect();
            counts[idx] = spans.len();
            claimed.extend(spans);
        }
        counts
    }

    /// The `n` most frequent terms with a non-zero count.
    #[must_use]
    pub fn top_terms(&self, text: &str, n: usize) -> Vec<String> {
        let counts = self.counts(text);
        let mut ranked: Vec<usize> = (0..counts.len()).filter(|&i| counts[i] > 0).collect();
        // Stable: equal counts keep vocabulary order.
        ranked.sort_by_key(|&i| std::cmp::Reverse(counts[i]));
        ranked
            .into_iter()
            .take(n)
            .map(|i| self.vocabulary.terms()[i].clone())
            .collect()
    }

    /// The earliest standalone occurrence across all terms.
    ///
    /// Returns `(term index, byte offset)`. Ties on offset go to the longer
    /// term, then to vocabulary order.
    #[must_use]
    pub fn earliest(&self, text: &str) -> Option<(usize, usize)> {
        self.patterns
            .iter()
            .enumerate()
            .filter_map(|(idx, re)| {
                let span = standalone_spans(re.as_ref()?, text).next()?;
                Some((idx, span))
            })
            .min_by_key(|(idx, span)| (span.start, std::cmp::Reverse(span.len()), *idx))
            .map(|(idx, span)| (idx, span.start))
    }
}
