//! Result types for pipeline output.
//!
//! One [`PageResult`] is produced per input URL. Enrichment fields are
//! explicit optional values: `None` means the stage never ran for this
//! report, `Some(Field::..)` holds either data or a sentinel.

use serde::Serialize;

use crate::deployment::DeploymentType;

/// Sentinel rendered for every derived field of a row whose fetch failed.
pub const FETCH_ERROR: &str = "Fetch Error";

/// Sentinel rendered when a stage had no text to search.
pub const NOT_SEARCHED: &str = "Not Searched";

/// Title used when a fetched page has no usable `<title>`.
pub const NO_TITLE: &str = "No Title Found";

/// Outcome of one enrichment field for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Field<T> {
    /// The stage produced data.
    Value(T),
    /// The stage searched and found nothing.
    NotFound,
    /// There was no text to search.
    NotSearched,
    /// The page was never fetched.
    FetchError,
}

impl<T> Field<T> {
    /// The produced data, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Render for a report cell.
    ///
    /// `not_found` is the field-specific "nothing found" label, e.g.
    /// `"No Roles Found"`.
    pub fn render_with(&self, not_found: &str, render: impl FnOnce(&T) -> String) -> String {
        match self {
            Self::Value(v) => render(v),
            Self::NotFound => not_found.to_string(),
            Self::NotSearched => NOT_SEARCHED.to_string(),
            Self::FetchError => FETCH_ERROR.to_string(),
        }
    }
}

/// Body text extracted from a page's main content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Content {
    /// Whitespace-normalized main-content text.
    Text(String),
    /// No main-content container existed.
    NotAvailable,
    /// The container existed but held no text after stripping.
    Empty,
    /// The page was never fetched.
    FetchError,
}

impl Content {
    /// The extracted text, if there is any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(t) => f.write_str(t),
            Self::NotAvailable => f.write_str("Content Not Available"),
            Self::Empty => f.write_str("Main Content Not Found"),
            Self::FetchError => f.write_str(FETCH_ERROR),
        }
    }
}

/// Vocabulary and keyword fields produced by the tagging stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    pub roles: Option<Field<Vec<String>>>,
    pub functional_area: Option<Field<String>>,
    pub topics: Option<Field<Vec<String>>>,
    pub keywords: Option<Field<Vec<String>>>,
}

/// Analysis result for one input URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    /// Page title, `"No Title Found"`, or `"Fetch Error"`.
    pub title: String,

    /// The input URL, verbatim.
    pub url: String,

    /// Deployment applicability.
    pub deployment: DeploymentType,

    /// Matched user roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Field<Vec<String>>>,

    /// Primary functional area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_area: Option<Field<String>>,

    /// Matched topics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Field<Vec<String>>>,

    /// Generated keywords (at most 20 by default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Field<Vec<String>>>,

    /// Main-content text.
    pub content: Content,
}

impl PageResult {
    /// Row for a URL whose fetch failed.
    #[must_use]
    pub fn fetch_failed(url: impl Into<String>) -> Self {
        Self {
            title: FETCH_ERROR.to_string(),
            url: url.into(),
            deployment: DeploymentType::FetchError,
            roles: None,
            functional_area: None,
            topics: None,
            keywords: None,
            content: Content::FetchError,
        }
    }

    /// Whether this row's fetch failed.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(self.deployment, DeploymentType::FetchError)
    }

    /// A new row carrying the tagging stage's fields.
    #[must_use]
    pub fn with_tags(self, tags: TagSet) -> Self {
        Self {
            roles: tags.roles,
            functional_area: tags.functional_area,
            topics: tags.topics,
            keywords: tags.keywords,
            ..self
        }
    }

    /// A new row with a different deployment classification.
    #[must_use]
    pub fn with_deployment(self, deployment: DeploymentType) -> Self {
        Self { deployment, ..self }
    }
}

/// Report columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Column {
    PageTitle,
    PageUrl,
    DeploymentType,
    UserRole,
    FunctionalArea,
    Topics,
    Keywords,
    Content,
}

impl Column {
    /// Header text written to the report.
    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            Self::PageTitle => "Page Title",
            Self::PageUrl => "Page URL",
            Self::DeploymentType => "Deployment Type",
            Self::UserRole => "User Role",
            Self::FunctionalArea => "Functional Area",
            Self::Topics => "Topics",
            Self::Keywords => "Keywords",
            Self::Content => "Content",
        }
    }
}

/// Ordered rows plus the columns the stages that ran produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<PageResult>,
    pub columns: Vec<Column>,
    /// Set when the run was cancelled; `rows` then holds the completed prefix.
    pub cancelled: bool,
}

impl Report {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows whose fetch failed.
    #[must_use]
    pub fn fetch_failures(&self) -> usize {
        self.rows.iter().filter(|r| r.is_fetch_error()).count()
    }
}
