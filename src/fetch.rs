//! Page fetching.
//!
//! One GET per URL with a fixed timeout and a browser user agent; no retry.
//! Outcomes, failures included, are memoized per URL for the lifetime of the
//! [`Fetcher`], and concurrent requests for the same URL share one fetch.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::encoding::decode_html;
use crate::error::{Error, FetchError, Result};
use crate::options::Options;

/// Browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Redirect hops followed before the fetch fails.
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL after redirects.
    pub final_url: String,
    /// HTTP status of the final response.
    pub status: u16,
    /// Body decoded to UTF-8.
    pub html: String,
}

/// Result of fetching one URL.
pub type FetchOutcome = std::result::Result<Arc<FetchedPage>, FetchError>;

/// Anything that can supply raw HTML for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Validate that `raw` is an absolute http(s) URL with a host.
pub fn parse_page_url(raw: &str) -> std::result::Result<Url, FetchError> {
    let url = Url::parse(raw.trim()).map_err(|_| FetchError::InvalidUrl(raw.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(FetchError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Whether a `Content-Type` value denotes an HTML document.
#[must_use]
pub fn is_html_content_type(content_type: &str) -> bool {
    let media = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    media == "text/html" || media == "application/xhtml+xml"
}

fn classify_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_redirect() {
        FetchError::Redirect(err.to_string())
    } else if err.is_connect() {
        FetchError::Connect(err.to_string())
    } else {
        FetchError::Request(err.to_string())
    }
}

/// HTTP page source with per-URL memoization.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    cache: Cache<String, FetchOutcome>,
}

impl Fetcher {
    /// Build a fetcher from the HTTP settings in `options`.
    pub fn new(options: &Options) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            cache: Cache::new(options.cache_capacity),
        })
    }

    /// Number of distinct URLs fetched so far.
    pub async fn cached_urls(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    async fn fetch_uncached(&self, raw_url: &str) -> FetchOutcome {
        let url = parse_page_url(raw_url)?;
        debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if let Some(ct) = content_type.as_deref() {
            if !is_html_content_type(ct) {
                return Err(FetchError::NotHtml(ct.to_string()));
            }
        }

        let final_url = response.url().to_string();
        let body = response.bytes().await.map_err(|e| classify_error(&e))?;
        debug!(url = %final_url, status = status.as_u16(), bytes = body.len(), "page fetched");

        Ok(Arc::new(FetchedPage {
            final_url,
            status: status.as_u16(),
            html: decode_html(&body, content_type.as_deref()),
        }))
    }
}

#[async_trait]
impl PageSource for Fetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        self.cache
            .get_with(url.to_string(), self.fetch_uncached(url))
            .await
    }
}
