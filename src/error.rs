//! Error types for rs-doctagger.
//!
//! Row-level failures (fetch, parse, LLM) never escape the pipeline; they are
//! turned into sentinel values on the affected `PageResult`. The `Error` enum
//! is what the library returns for operator-level failures (unreadable input
//! files, empty vocabularies, bad configuration, export I/O).

/// Error type for pipeline and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page could not be fetched.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// A fetched document had no parseable structure.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// A vocabulary source produced zero terms.
    #[error("Vocabulary '{name}' contains no terms")]
    VocabularyEmpty {
        /// Which vocabulary (roles, areas, topics).
        name: String,
    },

    /// The LLM fallback classifier failed.
    #[error("LLM fallback failed: {0}")]
    Llm(#[from] LlmError),

    /// Configuration file or value is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading input or writing the report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Why a single URL could not be fetched.
///
/// Cloneable so that a failed fetch can be memoized alongside successful ones.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The input line is not an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Following redirects failed (loop or too many hops).
    #[error("redirect failed: {0}")]
    Redirect(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The response declared a non-HTML content type.
    #[error("response is not HTML (content-type: {0})")]
    NotHtml(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Request(String),
}

/// Why the LLM fallback classifier produced no usable label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    /// Network, authentication or timeout failure talking to the model.
    #[error("LLM API call failed: {0}")]
    Api(String),

    /// The model answered with something outside the closed label set.
    #[error("LLM answer outside the label set: {0:?}")]
    UnexpectedLabel(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
