//! Keyword generation from page body text.
//!
//! Candidates are unigrams, bigrams and trigrams built over the token stream
//! left after stop-word removal, ranked by raw frequency. Windows span the
//! filtered tokens, so "quality of the data" yields the bigram
//! "quality data".

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::patterns::{OCF_CONNECTOR, WORD_TOKEN};
use crate::result::Field;

/// Default cap on the number of keywords per page.
pub const DEFAULT_MAX_KEYWORDS: usize = 20;

/// Report label for pages that produced no candidate.
pub const NO_KEYWORDS_FOUND: &str = "No Keywords Found";

/// Longest phrase (in tokens) considered as a candidate.
const MAX_NGRAM: usize = 3;

/// English stop words dropped before candidate construction.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and",
        "any", "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does",
        "doesn", "doing", "don", "down", "during", "each", "few", "for", "from", "further",
        "had", "hadn", "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers",
        "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "isn", "it",
        "its", "itself", "just", "ll", "m", "ma", "me", "mightn", "more", "most", "mustn", "my",
        "myself", "needn", "no", "nor", "not", "now", "o", "of", "off", "on", "once", "only",
        "or", "other", "our", "ours", "ourselves", "out", "over", "own", "re", "s", "same",
        "shan", "she", "should", "shouldn", "so", "some", "such", "t", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "to", "too", "under", "until", "up", "ve", "very", "was", "wasn",
        "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom", "why",
        "will", "with", "won", "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
        "also", "may", "must", "might", "would", "could", "shall", "us", "via", "within",
        "without", "etc", "eg", "ie",
    ]
    .into_iter()
    .collect()
});

/// Tokens that disqualify any phrase containing them: UI chrome,
/// placeholders, SQL keywords and release-status words.
pub static EXCLUDED_TERMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // UI
        "click", "button", "buttons", "tab", "tabs", "menu", "icon", "dropdown", "checkbox",
        "toggle", "page", "pages", "screen", "dialog", "window", "link", "links", "navigate",
        "scroll", "enter", "open", "close", "save", "cancel", "ok", "next", "previous", "back",
        "home", "right", "left", "top", "bottom", "see", "following", "shown", "image",
        "screenshot",
        // placeholders
        "example", "examples", "sample", "placeholder", "lorem", "ipsum", "foo", "bar", "baz",
        "xxx", "todo", "tbd", "note", "notes", "tip", "important", "your_value", "value",
        "name", "id",
        // SQL
        "select", "from", "where", "join", "insert", "update", "delete", "create", "drop",
        "alter", "null", "varchar", "int", "integer", "values", "into", "group", "order",
        "limit", "union", "distinct", "count", "sum", "true", "false",
        // release status
        "beta", "alpha", "preview", "deprecated", "new", "ga", "release", "releases",
        "released", "version", "versions", "available", "coming", "soon", "early", "access",
    ]
    .into_iter()
    .collect()
});

/// The two connector keywords for pages naming `<Word> OCF Connector`.
///
/// Uses the first occurrence, keeping the product word's casing from the
/// page: "snowflake ocf connector" yields `"snowflake OCF Connector"`.
#[must_use]
pub fn ocf_keywords(text: &str) -> Option<[String; 2]> {
    let word = OCF_CONNECTOR.captures(text)?.get(1)?.as_str();
    Some([format!("{word} OCF Connector"), format!("{word} data source")])
}

/// Render keywords for a single report cell.
#[must_use]
pub fn render_keywords(keywords: &[String]) -> String {
    keywords.join(", ")
}

/// Builds ranked keyword lists.
#[derive(Debug, Clone)]
pub struct KeywordGenerator {
    max_keywords: usize,
    extra_excluded: HashSet<String>,
}

impl Default for KeywordGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS)
    }
}

impl KeywordGenerator {
    #[must_use]
    pub fn new(max_keywords: usize) -> Self {
        Self {
            max_keywords,
            extra_excluded: HashSet::new(),
        }
    }

    /// Add site-specific tokens to the exclusion vocabulary.
    #[must_use]
    pub fn with_excluded_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_excluded
            .extend(terms.into_iter().map(|t| t.as_ref().trim().to_lowercase()));
        self
    }

    #[must_use]
    pub fn max_keywords(&self) -> usize {
        self.max_keywords
    }

    /// Generate at most `max_keywords` distinct keywords for `text`.
    #[must_use]
    pub fn generate(&self, text: &str) -> Field<Vec<String>> {
        if text.trim().is_empty() {
            return Field::NotSearched;
        }

        let mut keywords: Vec<String> = Vec::with_capacity(self.max_keywords);
        let mut seen: HashSet<String> = HashSet::new();
        let leading = ocf_keywords(text).into_iter().flatten();
        let ranked = self.ranked_candidates(&self.tokens(text));

        for phrase in leading.chain(ranked) {
            if keywords.len() >= self.max_keywords {
                break;
            }
            if seen.insert(phrase.to_lowercase()) {
                keywords.push(phrase);
            }
        }

        if keywords.is_empty() {
            Field::NotFound
        } else {
            Field::Value(keywords)
        }
    }

    /// Lower-cased tokens with stop words and 1-char tokens removed.
    fn tokens(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        WORD_TOKEN
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t))
            .map(str::to_string)
            .collect()
    }

    fn is_excluded(&self, token: &str) -> bool {
        EXCLUDED_TERMS.contains(token) || self.extra_excluded.contains(token)
    }

    /// All 1..=3-token phrases ranked by frequency, ties by first appearance.
    ///
    /// Phrases are generated unigrams first, then bigrams, then trigrams, so
    /// "first appearance" favours shorter phrases on equal counts.
    fn ranked_candidates(&self, tokens: &[String]) -> Vec<String> {
        let mut phrases: Vec<String> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for n in 1..=MAX_NGRAM {
            for window in tokens.windows(n) {
                if window.iter().any(|t| self.is_excluded(t)) {
                    continue;
                }
                let phrase = window.join(" ");
                match index.get(&phrase) {
                    Some(&i) => counts[i] += 1,
                    None => {
                        index.insert(phrase.clone(), phrases.len());
                        phrases.push(phrase);
                        counts.push(1);
                    }
                }
            }
        }

        let mut order: Vec<usize> = (0..phrases.len()).collect();
        order.sort_by_key(|&i| std::cmp::Reverse(counts[i]));
        order.into_iter().map(|i| phrases[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(text: &str) -> Vec<String> {
        match KeywordGenerator::default().generate(text) {
            Field::Value(v) => v,
            other => panic!("expected keywords, got {other:?}"),
        }
    }

    #[test]
    fn stop_words_and_short_tokens_are_dropped() {
        let kws = keywords("The catalog is a x tool");
        assert!(kws.contains(&"catalog".to_string()));
        assert!(kws.contains(&"tool".to_string()));
        assert!(!kws.iter().any(|k| k == "the" || k == "is" || k == "x"));
    }

    #[test]
    fn ngrams_span_removed_stop_words() {
        let kws = keywords("quality of the data");
        assert_eq!(kws, vec!["quality", "data", "quality data"]);
    }

    #[test]
    fn ranked_by_frequency_then_first_seen() {
        let kws = keywords("lineage graph lineage catalog lineage graph");
        assert_eq!(kws[0], "lineage");
        assert_eq!(kws[1], "graph");
        // "lineage graph" appears twice, same as "graph"; bigrams come after unigrams
        assert_eq!(kws[2], "lineage graph");
        assert_eq!(kws[3], "catalog");
    }

    #[test]
    fn excluded_token_disqualifies_whole_phrase() {
        let kws = keywords("click lineage button");
        assert_eq!(kws, vec!["lineage"]);
    }

    #[test]
    fn custom_exclusions_apply() {
        let generator = KeywordGenerator::default().with_excluded_terms(["Lineage"]);
        assert_eq!(generator.generate("lineage catalog"), Field::Value(vec!["catalog".to_string()]));
    }

    #[test]
    fn output_capped_at_twenty_without_duplicates() {
        let text = (0..60).map(|i| format!("term{i} ")).collect::<String>();
        let kws = keywords(&text);
        assert_eq!(kws.len(), DEFAULT_MAX_KEYWORDS);
        let distinct: HashSet<&String> = kws.iter().collect();
        assert_eq!(distinct.len(), kws.len());
    }

    #[test]
    fn fewer_candidates_are_not_padded() {
        assert_eq!(keywords("governance"), vec!["governance"]);
    }

    #[test]
    fn ocf_connector_entries_lead_the_list() {
        let text = "Install the Snowflake OCF Connector. The connector syncs metadata. \
                    Metadata extraction runs nightly; metadata is profiled.";
        let kws = keywords(text);
        assert_eq!(kws[0], "Snowflake OCF Connector");
        assert_eq!(kws[1], "Snowflake data source");
        assert!(!kws.iter().skip(2).any(|k| k.eq_ignore_ascii_case("snowflake ocf connector")));
        assert!(kws.contains(&"metadata".to_string()));
        assert!(kws.len() <= DEFAULT_MAX_KEYWORDS);
    }

    #[test]
    fn ocf_keywords_keep_page_casing() {
        assert_eq!(
            ocf_keywords("see the mysql ocf connector"),
            Some(["mysql OCF Connector".to_string(), "mysql data source".to_string()])
        );
        assert_eq!(ocf_keywords("no connector here"), None);
    }

    #[test]
    fn empty_text_is_not_searched_and_stop_words_only_is_not_found() {
        let generator = KeywordGenerator::default();
        assert_eq!(generator.generate("  "), Field::NotSearched);
        assert_eq!(generator.generate("the of and a"), Field::NotFound);
    }

    #[test]
    fn smaller_cap_is_respected() {
        let generator = KeywordGenerator::new(2);
        let result = generator.generate("lineage catalog glossary steward");
        assert_eq!(result, Field::Value(vec!["lineage".to_string(), "catalog".to_string()]));
    }

    #[test]
    fn render_joins_with_comma_space() {
        let rendered = render_keywords(&["data quality".to_string(), "lineage".to_string()]);
        assert_eq!(rendered, "data quality, lineage");
    }
}
