//! # rs-doctagger
//!
//! Enrichment pipeline for product documentation pages.
//!
//! Given a list of page URLs, this library fetches each page and produces one
//! report row per URL: title, deployment applicability (from the page's
//! marker paragraphs, optionally with an LLM fallback), user roles, a single
//! primary functional area, topics and generated keywords. Navigation,
//! header, footer and sidebar text is stripped before tagging.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_doctagger::{analyze_html, DeploymentType};
//!
//! let html = r#"<html><head><title>Lineage</title></head>
//! <body><p class="cloud-label">Cloud</p>
//! <article><p>Lineage graphs show upstream sources.</p></article></body></html>"#;
//!
//! let row = analyze_html("https://docs.example.com/lineage", html);
//! assert_eq!(row.title, "Lineage");
//! assert_eq!(row.deployment, DeploymentType::Cloud);
//! ```
//!
//! A full run fetches over HTTP:
//!
//! ```rust,no_run
//! use rs_doctagger::{Options, Pipeline, Vocabulary, VocabularyKind};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> rs_doctagger::Result<()> {
//! let pipeline = Pipeline::new(Options::default())?
//!     .with_vocabulary(VocabularyKind::Roles, Vocabulary::new("roles", ["Steward", "Viewer"]));
//! let urls = vec!["https://docs.example.com/lineage".to_string()];
//! let report = pipeline.run(&urls, &CancellationToken::new()).await;
//! rs_doctagger::export::export(&report, "report.csv".as_ref(), rs_doctagger::Format::Csv)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Page fetching with per-URL memoization.
pub mod fetch;

/// Title lookup, boilerplate stripping and main-text extraction.
pub mod content;

/// Deployment-marker classification.
pub mod deployment;

/// Line-oriented vocabularies.
pub mod vocabulary;

/// Standalone term matching.
pub mod matcher;

/// Primary functional area resolution.
pub mod area;

/// Keyword generation.
pub mod keywords;

/// LLM fallback classifier.
pub mod llm;

/// Deployment and tagging stages.
pub mod pipeline;

/// CSV and JSON report export.
pub mod export;

/// TOML configuration file.
pub mod config;

// Public API - re-exports
pub use config::FileConfig;
pub use deployment::{DeploymentType, UnknownReason};
pub use error::{Error, FetchError, LlmError, Result};
pub use export::Format;
pub use matcher::{MatchMode, VocabularyMatcher};
pub use options::Options;
pub use pipeline::{analyze_html, Pipeline, VocabularyKind};
pub use result::{
    Column, Content, Field, PageResult, Report, TagSet, FETCH_ERROR, NOT_SEARCHED, NO_TITLE,
};
pub use vocabulary::Vocabulary;
