//! Compiled regex patterns and CSS selectors used by the analysis stages.
//!
//! All patterns are compiled once using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Patterns
// =============================================================================

/// Matches runs of whitespace for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Word tokens for keyword generation (applied to lower-cased text).
pub static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("WORD_TOKEN regex"));

/// Connector product names like "Snowflake OCF Connector".
///
/// Capture group 1 is the product word as written in the page.
pub static OCF_CONNECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\w+)\s+OCF\s+Connector\b").expect("OCF_CONNECTOR regex")
});

/// Charset parameter of an HTTP `Content-Type` header.
pub static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("HEADER_CHARSET regex")
});

// =============================================================================
// CSS Selectors
// =============================================================================

/// Preferred main-content container.
pub const ARTICLE_SELECTOR: &str = "article";

/// Second-choice main-content container.
pub const MAIN_SELECTOR: &str = "main";

/// Whole-document fallback container.
pub const BODY_SELECTOR: &str = "body";

/// Page title element.
pub const TITLE_SELECTOR: &str = "title";

/// Landmark subtrees removed from the main content before text extraction.
pub const BOILERPLATE_SELECTOR: &str = "nav, header, footer, aside, \
     [role='navigation'], [role='banner'], [role='contentinfo'], [role='complementary']";

/// Elements whose text is never visible body text.
pub const INVISIBLE_SELECTOR: &str = "script, style, noscript, template";

/// Cloud deployment marker.
pub const CLOUD_MARKER_SELECTOR: &str = "p.cloud-label";

/// Customer-managed (on-premises) deployment marker.
pub const ON_PREM_MARKER_SELECTOR: &str = "p.on-prem-label";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_normalize_collapses_spaces() {
        let result = WHITESPACE_NORMALIZE.replace_all("hello \n\t  world", " ");
        assert_eq!(result, "hello world");
    }

    #[test]
    fn ocf_connector_captures_product_word() {
        let caps = OCF_CONNECTOR.captures("Install the Snowflake ocf connector first");
        let word = caps.and_then(|c| c.get(1)).map(|m| m.as_str());
        assert_eq!(word, Some("Snowflake"));
    }

    #[test]
    fn ocf_connector_requires_both_words() {
        assert!(!OCF_CONNECTOR.is_match("Snowflake OCF driver"));
        assert!(!OCF_CONNECTOR.is_match("Snowflake Connector"));
    }

    #[test]
    fn word_token_splits_on_punctuation() {
        let tokens: Vec<&str> = WORD_TOKEN
            .find_iter("data-quality, rules.")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(tokens, vec!["data", "quality", "rules"]);
    }

    #[test]
    fn header_charset_reads_quoted_and_bare_values() {
        let bare = HEADER_CHARSET.captures("text/html; charset=ISO-8859-1");
        assert_eq!(bare.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("ISO-8859-1"));
        let quoted = HEADER_CHARSET.captures(r#"text/html; charset="utf-8""#);
        assert_eq!(quoted.and_then(|c| c.get(1)).map(|m| m.as_str()), Some("utf-8"));
    }
}
