//! Controlled vocabularies (roles, functional areas, topics).
//!
//! A vocabulary is an ordered list of terms read one per line. Case is kept
//! for output; matching is case-insensitive and lives in [`crate::matcher`].

use std::path::Path;

use crate::error::{Error, Result};

/// Split line-oriented input into trimmed, non-empty entries.
///
/// Used for both URL lists and vocabulary files. A leading UTF-8 BOM is
/// ignored so files saved by spreadsheet tools load cleanly.
#[must_use]
pub fn parse_lines(text: &str) -> Vec<String> {
    text.trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// An ordered sequence of candidate terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    name: String,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from terms; entries are trimmed and blanks are
    /// dropped. Inner whitespace is kept verbatim.
    ///
    /// Duplicates are kept here; [`crate::matcher::VocabularyMatcher`]
    /// reports each distinct term once.
    pub fn new<I, S>(name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            name: name.into(),
            terms,
        }
    }

    /// Parse one term per line, failing with `VocabularyEmpty` on zero terms.
    pub fn from_lines(name: impl Into<String>, text: &str) -> Result<Self> {
        let vocabulary = Self::new(name, parse_lines(text));
        if vocabulary.is_empty() {
            return Err(Error::VocabularyEmpty {
                name: vocabulary.name,
            });
        }
        Ok(vocabulary)
    }

    /// Read a vocabulary file (one term per line).
    pub fn from_path(name: impl Into<String>, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_lines(name, &text)
    }

    /// Label of this vocabulary, used in log messages and errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Terms in their original order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term indices ordered longest term first.
    ///
    /// Length is counted in chars; the sort is stable so equal-length terms
    /// keep vocabulary order.
    #[must_use]
    pub fn indices_by_length_desc(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.terms.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(self.terms[i].chars().count()));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines_trims_and_skips_blanks() {
        let lines = parse_lines("\u{feff} https://a.example/x \n\n\t\nhttps://b.example/y\r\n");
        assert_eq!(lines, vec!["https://a.example/x", "https://b.example/y"]);
    }

    #[test]
    fn from_lines_preserves_order_and_case() {
        let vocab = Vocabulary::from_lines("roles", "Steward\nData Engineer\n  Viewer  ");
        match vocab {
            Ok(v) => assert_eq!(v.terms(), ["Steward", "Data Engineer", "Viewer"]),
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn from_lines_rejects_blank_input() {
        let result = Vocabulary::from_lines("topics", "\n   \n");
        assert!(matches!(result, Err(Error::VocabularyEmpty { ref name }) if name == "topics"));
    }

    #[test]
    fn inner_whitespace_is_kept_verbatim() {
        let vocab = Vocabulary::new("areas", ["  Data \t  Quality "]);
        assert_eq!(vocab.terms(), ["Data \t  Quality"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let vocab = Vocabulary::new("roles", ["Admin", "Admin"]);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn indices_by_length_desc_is_stable() {
        let vocab = Vocabulary::new("areas", ["Data", "Data Quality", "Lineage", "Search"]);
        assert_eq!(vocab.indices_by_length_desc(), vec![1, 2, 3, 0]);
    }
}
