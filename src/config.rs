//! TOML configuration file.
//!
//! Every key is optional; values present in the file override
//! [`Options::default`], and command-line flags override the file.
//!
//! ```toml
//! [http]
//! timeout_secs = 20
//! concurrency = 4
//!
//! [matching]
//! roles_top = 2
//!
//! [keywords]
//! max = 15
//! excluded = ["alation", "catalog"]
//!
//! [llm]
//! enabled = true
//! model = "gpt-4o-mini"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::matcher::MatchMode;
use crate::options::Options;

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub http: HttpConfig,
    pub matching: MatchingConfig,
    pub keywords: KeywordsConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

/// `[http]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub concurrency: Option<usize>,
    pub cache_capacity: Option<u64>,
}

/// `[matching]` section. A `*_top` value switches that vocabulary to top-N
/// reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    pub roles_top: Option<usize>,
    pub topics_top: Option<usize>,
    pub longest_first: Option<bool>,
}

/// `[keywords]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordsConfig {
    pub enabled: Option<bool>,
    pub max: Option<usize>,
    pub excluded: Vec<String>,
}

/// `[llm]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    pub enabled: Option<bool>,
    pub model: Option<String>,
    pub max_chars: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub api_key: Option<String>,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub include_content: Option<bool>,
}

impl FileConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<()> {
        let zero = |field: &str| Err(Error::Config(format!("'{field}' must be greater than zero")));
        if self.http.timeout_secs == Some(0) {
            return zero("http.timeout_secs");
        }
        if self.http.concurrency == Some(0) {
            return zero("http.concurrency");
        }
        if self.matching.roles_top == Some(0) {
            return zero("matching.roles_top");
        }
        if self.matching.topics_top == Some(0) {
            return zero("matching.topics_top");
        }
        if self.http.cache_capacity == Some(0) {
            return zero("http.cache_capacity");
        }
        if self.keywords.max == Some(0) {
            return zero("keywords.max");
        }
        if self.llm.max_chars == Some(0) {
            return zero("llm.max_chars");
        }
        if self.llm.timeout_secs == Some(0) {
            return zero("llm.timeout_secs");
        }
        if self.llm.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(Error::Config("'llm.model' cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Overlay the values present in this file onto `options`.
    #[must_use]
    pub fn apply(self, mut options: Options) -> Options {
        let Self {
            http,
            matching,
            keywords,
            llm,
            output,
        } = self;

        if let Some(secs) = http.timeout_secs {
            options.timeout = Duration::from_secs(secs);
        }
        if let Some(ua) = http.user_agent {
            options.user_agent = ua;
        }
        if let Some(n) = http.concurrency {
            options.concurrency = n;
        }
        if let Some(n) = http.cache_capacity {
            options.cache_capacity = n;
        }

        if let Some(n) = matching.roles_top {
            options.roles_mode = MatchMode::TopN(n);
        }
        if let Some(n) = matching.topics_top {
            options.topics_mode = MatchMode::TopN(n);
        }
        if let Some(enabled) = matching.longest_first {
            options.longest_first = enabled;
        }

        if let Some(enabled) = keywords.enabled {
            options.generate_keywords = enabled;
        }
        if let Some(n) = keywords.max {
            options.max_keywords = n;
        }
        options.excluded_terms.extend(keywords.excluded);

        if let Some(enabled) = llm.enabled {
            options.run_llm_fallback = enabled;
        }
        if let Some(model) = llm.model {
            options.llm_model = model;
        }
        if let Some(n) = llm.max_chars {
            options.llm_max_chars = n;
        }
        if let Some(secs) = llm.timeout_secs {
            options.llm_timeout = Duration::from_secs(secs);
        }
        if llm.api_key.is_some() {
            options.llm_api_key = llm.api_key;
        }

        if let Some(enabled) = output.include_content {
            options.include_content = enabled;
        }

        options
    }
}
