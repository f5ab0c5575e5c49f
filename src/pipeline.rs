//! The two-stage tagging pipeline.
//!
//! The deployment stage fetches every URL, reads its title, classifies its
//! deployment from the marker paragraphs (on the unstripped document) and
//! extracts its boilerplate-free body text. The tagging stage consumes that
//! report and produces a new one with vocabulary and keyword fields.
//!
//! Rows always come out in input order, one per input URL, whatever the
//! concurrency setting.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::area;
use crate::content::Page;
use crate::deployment;
use crate::error::{Error, Result};
use crate::fetch::{Fetcher, PageSource};
use crate::keywords::KeywordGenerator;
use crate::llm::{self, DeploymentOracle};
use crate::matcher::VocabularyMatcher;
use crate::options::Options;
use crate::result::{Column, Content, Field, PageResult, Report, TagSet, NO_TITLE};
use crate::vocabulary::Vocabulary;

/// Which tagging vocabulary a list of terms feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyKind {
    Roles,
    Areas,
    Topics,
}

impl VocabularyKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Areas => "areas",
            Self::Topics => "topics",
        }
    }
}

/// Deployment-stage row for already fetched HTML.
///
/// Deployment markers are detected on the full document, before boilerplate
/// stripping, since they may sit inside a header.
#[must_use]
pub fn analyze_html(url: &str, html: &str) -> PageResult {
    let (title, deployment, content) = match Page::parse(html) {
        Ok(page) => {
            let title = page.title();
            let deployment = deployment::classify(Some(page.document()));
            (title, deployment, page.into_main_text())
        }
        Err(err) => {
            warn!(url, error = %err, "page could not be analysed");
            (NO_TITLE.to_string(), deployment::classify(None), Content::NotAvailable)
        }
    };
    debug!(url, deployment = %deployment, "page analysed");

    PageResult {
        title,
        url: url.to_string(),
        deployment,
        roles: None,
        functional_area: None,
        topics: None,
        keywords: None,
        content,
    }
}

/// Fetches, classifies and tags documentation pages.
pub struct Pipeline {
    options: Options,
    source: Arc<dyn PageSource>,
    oracle: Option<Arc<dyn DeploymentOracle>>,
    roles: Option<VocabularyMatcher>,
    areas: Option<VocabularyMatcher>,
    topics: Option<VocabularyMatcher>,
    keywords: Option<KeywordGenerator>,
}

impl Pipeline {
    /// Pipeline fetching over HTTP.
    ///
    /// With `run_llm_fallback` set and the `llm` feature enabled, an OpenAI
    /// oracle is configured from `llm_model` and `llm_api_key`.
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = Fetcher::new(&options)?;
        let pipeline = Self::with_source(options, Arc::new(fetcher));

        if !pipeline.options.run_llm_fallback {
            return Ok(pipeline);
        }

        #[cfg(feature = "llm")]
        {
            let oracle = llm::OpenAiOracle::new(
                pipeline.options.llm_api_key.as_deref(),
                pipeline.options.llm_model.clone(),
            );
            Ok(pipeline.with_oracle(Arc::new(oracle)))
        }

        #[cfg(not(feature = "llm"))]
        {
            warn!("LLM fallback requested but this build has no `llm` feature");
            Ok(pipeline)
        }
    }

    /// Pipeline reading pages from `source`.
    #[must_use]
    pub fn with_source(options: Options, source: Arc<dyn PageSource>) -> Self {
        let keywords = options.generate_keywords.then(|| {
            KeywordGenerator::new(options.max_keywords).with_excluded_terms(&options.excluded_terms)
        });
        Self {
            options,
            source,
            oracle: None,
            roles: None,
            areas: None,
            topics: None,
            keywords,
        }
    }

    /// Use `oracle` for pages without deployment markers. Only consulted
    /// when `run_llm_fallback` is set.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn DeploymentOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Enable a tagging stage.
    ///
    /// An empty vocabulary is reported and its stage stays disabled; the
    /// other stages are unaffected.
    #[must_use]
    pub fn with_vocabulary(mut self, kind: VocabularyKind, vocabulary: Vocabulary) -> Self {
        if vocabulary.is_empty() {
            let err = Error::VocabularyEmpty {
                name: vocabulary.name().to_string(),
            };
            warn!(error = %err, stage = kind.name(), "tagging stage skipped");
            return self;
        }

        let matcher = VocabularyMatcher::new(vocabulary).longest_first(self.options.longest_first);
        match kind {
            VocabularyKind::Roles => self.roles = Some(matcher),
            VocabularyKind::Areas => self.areas = Some(matcher),
            VocabularyKind::Topics => self.topics = Some(matcher),
        }
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run both stages over `urls`.
    ///
    /// If `cancel` fires, the rows finished so far are returned in order and
    /// the report is marked cancelled.
    pub async fn run(&self, urls: &[String], cancel: &CancellationToken) -> Report {
        let report = self.deployment_stage(urls, cancel).await;
        let report = self.tagging_stage(report);
        info!(
            rows = report.len(),
            fetch_failures = report.fetch_failures(),
            cancelled = report.cancelled,
            "run finished"
        );
        report
    }

    /// Fetch and classify every URL.
    pub async fn deployment_stage(&self, urls: &[String], cancel: &CancellationToken) -> Report {
        let mut rows = Vec::with_capacity(urls.len());
        let mut cancelled = false;
        let mut pending = std::pin::pin!(stream::iter(urls)
            .map(|url| self.deployment_row(url))
            .buffered(self.options.effective_concurrency()));

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!(completed = rows.len(), total = urls.len(), "run cancelled");
                    cancelled = true;
                    break;
                }
                next = pending.next() => match next {
                    Some(row) => rows.push(row),
                    None => break,
                },
            }
        }

        Report {
            rows,
            columns: self.columns(false),
            cancelled,
        }
    }

    /// Add vocabulary and keyword fields to every row of `report`.
    #[must_use]
    pub fn tagging_stage(&self, report: Report) -> Report {
        let rows = report
            .rows
            .into_iter()
            .map(|row| {
                let tags = self.tags_for(&row);
                row.with_tags(tags)
            })
            .collect();
        Report {
            rows,
            columns: self.columns(true),
            cancelled: report.cancelled,
        }
    }

    async fn deployment_row(&self, url: &str) -> PageResult {
        let page = match self.source.fetch(url).await {
            Ok(page) => page,
            Err(err) => {
                warn!(url, error = %err, "fetch failed");
                return PageResult::fetch_failed(url);
            }
        };

        let row = analyze_html(url, &page.html);
        if !row.deployment.needs_fallback() || !self.options.run_llm_fallback {
            return row;
        }
        let (Some(oracle), Some(body)) = (self.oracle.as_deref(), row.content.text()) else {
            return row;
        };

        let deployment = llm::classify_with_fallback(
            oracle,
            body,
            self.options.llm_max_chars,
            self.options.llm_timeout,
        )
        .await;
        row.with_deployment(deployment)
    }

    fn tags_for(&self, row: &PageResult) -> TagSet {
        if row.is_fetch_error() {
            return TagSet {
                roles: self.roles.as_ref().map(|_| Field::FetchError),
                functional_area: self.areas.as_ref().map(|_| Field::FetchError),
                topics: self.topics.as_ref().map(|_| Field::FetchError),
                keywords: self.keywords.as_ref().map(|_| Field::FetchError),
            };
        }

        let body = row.content.text().unwrap_or_default();
        let title = if row.title == NO_TITLE { "" } else { row.title.as_str() };
        TagSet {
            roles: self.roles.as_ref().map(|m| m.find(body, self.options.roles_mode)),
            functional_area: self.areas.as_ref().map(|m| area::resolve(m, title, body)),
            topics: self.topics.as_ref().map(|m| m.find(body, self.options.topics_mode)),
            keywords: self.keywords.as_ref().map(|g| g.generate(body)),
        }
    }

    fn columns(&self, tagged: bool) -> Vec<Column> {
        let mut columns = vec![Column::PageTitle, Column::PageUrl, Column::DeploymentType];
        if tagged {
            let stages = [
                (self.roles.is_some(), Column::UserRole),
                (self.areas.is_some(), Column::FunctionalArea),
                (self.topics.is_some(), Column::Topics),
                (self.keywords.is_some(), Column::Keywords),
            ];
            columns.extend(stages.into_iter().filter(|(on, _)| *on).map(|(_, c)| c));
        }
        if self.options.include_content {
            columns.push(Column::Content);
        }
        columns
    }
}
