mod cli;

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rs_doctagger::export::{self, ExportSummary};
use rs_doctagger::vocabulary::{parse_lines, Vocabulary};
use rs_doctagger::{Error, FileConfig, Options, Pipeline, VocabularyKind};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<Options> {
    let options = match &cli.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .apply(Options::default()),
        None => Options::default(),
    };
    Ok(cli.apply(options))
}

fn read_urls(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list {}", path.display()))?;
    let urls = parse_lines(&text);
    if urls.is_empty() {
        bail!("no URLs in {}", path.display());
    }
    Ok(urls)
}

fn add_vocabulary(pipeline: Pipeline, kind: VocabularyKind, path: Option<&Path>) -> Result<Pipeline> {
    let Some(path) = path else {
        return Ok(pipeline);
    };
    match Vocabulary::from_path(kind.name(), path) {
        Ok(vocabulary) => Ok(pipeline.with_vocabulary(kind, vocabulary)),
        Err(err @ Error::VocabularyEmpty { .. }) => {
            warn!(path = %path.display(), error = %err, "vocabulary ignored");
            Ok(pipeline)
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn print_summary(summary: ExportSummary, output: &Path) {
    println!("\n=== Tagging Summary ===");
    println!("Pages processed: {}", summary.total_pages);
    println!("Fetch failures: {}", summary.fetch_failures);
    if summary.cancelled {
        println!("Run interrupted: report holds the pages completed before Ctrl-C");
    }
    println!("Report: {}", output.display());
    println!("=======================\n");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let urls = read_urls(&cli.urls)?;
    let options = load_options(&cli)?.with_cache_for(urls.len());

    let mut pipeline = Pipeline::new(options).context("failed to set up pipeline")?;
    pipeline = add_vocabulary(pipeline, VocabularyKind::Roles, cli.roles.as_deref())?;
    pipeline = add_vocabulary(pipeline, VocabularyKind::Areas, cli.areas.as_deref())?;
    pipeline = add_vocabulary(pipeline, VocabularyKind::Topics, cli.topics.as_deref())?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, writing partial report");
            interrupt.cancel();
        }
    });

    let report = pipeline.run(&urls, &cancel).await;
    export::export(&report, &cli.output, cli.format.into())
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    print_summary(ExportSummary::of(&report), &cli.output);
    Ok(())
}
