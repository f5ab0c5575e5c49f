//! Configuration options for a tagging run.
//!
//! The `Options` struct controls fetching, concurrency, vocabulary matching,
//! keyword generation and the optional LLM fallback.

use std::time::Duration;

use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::keywords::DEFAULT_MAX_KEYWORDS;
use crate::llm::{DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT, MAX_PROMPT_CHARS};
use crate::matcher::MatchMode;

/// Configuration options for a tagging run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_doctagger::{MatchMode, Options};
///
/// let options = Options {
///     concurrency: 4,
///     roles_mode: MatchMode::TopN(2),
///     ..Options::default()
/// };
/// assert!(!options.run_llm_fallback);
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Per-request fetch timeout.
    ///
    /// Default: 20 seconds
    pub timeout: Duration,

    /// `User-Agent` header sent with every request.
    ///
    /// Default: a desktop Chrome user agent
    pub user_agent: String,

    /// Maximum number of URLs whose fetch outcome is memoized.
    ///
    /// Past this bound older outcomes are evicted and a repeated URL may be
    /// fetched again. See [`Options::with_cache_for`].
    ///
    /// Default: `10_000`
    pub cache_capacity: u64,

    /// Number of URLs processed at once.
    ///
    /// `1` processes strictly in order. Larger values overlap fetches while
    /// keeping report rows in input order.
    ///
    /// Default: `1`
    pub concurrency: usize,

    /// Ask an LLM to classify pages that carry no deployment marker.
    ///
    /// Default: `false`
    pub run_llm_fallback: bool,

    /// Chat model used by the LLM fallback.
    ///
    /// Default: `"gpt-4o-mini"`
    pub llm_model: String,

    /// Body characters sent to the LLM.
    ///
    /// Default: `15_000`
    pub llm_max_chars: usize,

    /// Timeout for one LLM call.
    ///
    /// Default: 30 seconds
    pub llm_timeout: Duration,

    /// API key for the LLM provider. When `None`, `OPENAI_API_KEY` is read
    /// from the environment.
    ///
    /// Default: `None`
    pub llm_api_key: Option<String>,

    /// How user roles are reported.
    ///
    /// Default: [`MatchMode::All`]
    pub roles_mode: MatchMode,

    /// How topics are reported.
    ///
    /// Default: [`MatchMode::All`]
    pub topics_mode: MatchMode,

    /// Let a longer vocabulary term claim its span before shorter terms
    /// inside it are counted.
    ///
    /// Default: `true`
    pub longest_first: bool,

    /// Generate the Keywords column.
    ///
    /// Default: `true`
    pub generate_keywords: bool,

    /// Cap on keywords per page.
    ///
    /// Default: `20`
    pub max_keywords: usize,

    /// Extra tokens that disqualify keyword candidates.
    ///
    /// Default: empty
    pub excluded_terms: Vec<String>,

    /// Add the main-content text as a report column.
    ///
    /// Default: `false`
    pub include_content: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache_capacity: 10_000,
            concurrency: 1,
            run_llm_fallback: false,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_max_chars: MAX_PROMPT_CHARS,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            llm_api_key: None,
            roles_mode: MatchMode::All,
            topics_mode: MatchMode::All,
            longest_first: true,
            generate_keywords: true,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            excluded_terms: Vec::new(),
            include_content: false,
        }
    }
}

impl Options {
    /// Concurrency clamped to at least one worker.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Grow `cache_capacity` so a run over `url_count` URLs never evicts.
    #[must_use]
    pub fn with_cache_for(mut self, url_count: usize) -> Self {
        let needed = u64::try_from(url_count).unwrap_or(u64::MAX);
        self.cache_capacity = self.cache_capacity.max(needed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = Options::default();

        assert_eq!(opts.timeout, Duration::from_secs(20));
        assert!(opts.user_agent.contains("Chrome"));
        assert_eq!(opts.cache_capacity, 10_000);
        assert_eq!(opts.concurrency, 1);

        assert!(!opts.run_llm_fallback);
        assert_eq!(opts.llm_model, "gpt-4o-mini");
        assert_eq!(opts.llm_max_chars, 15_000);
        assert!(opts.llm_api_key.is_none());

        assert_eq!(opts.roles_mode, MatchMode::All);
        assert_eq!(opts.topics_mode, MatchMode::All);
        assert!(opts.longest_first);
        assert!(opts.generate_keywords);
        assert_eq!(opts.max_keywords, 20);
        assert!(opts.excluded_terms.is_empty());
        assert!(!opts.include_content);
    }

    #[test]
    fn cache_grows_to_fit_url_list() {
        assert_eq!(Options::default().with_cache_for(25_000).cache_capacity, 25_000);
        assert_eq!(Options::default().with_cache_for(3).cache_capacity, 10_000);
    }

    #[test]
    fn test_zero_concurrency_still_runs_one_worker() {
        let opts = Options {
            concurrency: 0,
            ..Options::default()
        };
        assert_eq!(opts.effective_concurrency(), 1);
    }

    #[test]
    fn test_custom_fields() {
        let opts = Options {
            timeout: Duration::from_secs(1),
            topics_mode: MatchMode::TopN(3),
            max_keywords: 5,
            ..Options::default()
        };

        assert_eq!(opts.timeout, Duration::from_secs(1));
        assert_eq!(opts.topics_mode, MatchMode::TopN(3));
        assert_eq!(opts.max_keywords, 5);
        assert_eq!(opts.roles_mode, MatchMode::All);
    }
}
