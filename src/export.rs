//! Report export to CSV and JSON.
//!
//! The CSV is UTF-8 with a byte-order mark so spreadsheet tools detect the
//! encoding, and every cell is quoted, which keeps the comma-separated
//! Keywords cell a single field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::area::NO_AREA_FOUND;
use crate::error::Result;
use crate::keywords::{render_keywords, NO_KEYWORDS_FOUND};
use crate::result::{Column, Field, PageResult, Report};

/// Label for pages where no role matched.
pub const NO_ROLES_FOUND: &str = "No Roles Found";

/// Label for pages where no topic matched.
pub const NO_TOPICS_FOUND: &str = "No Topics Found";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

fn render_list(field: &Field<Vec<String>>, not_found: &str) -> String {
    field.render_with(not_found, |v| v.join(", "))
}

/// Text of one report cell.
///
/// A column whose stage did not run for this row renders empty.
#[must_use]
pub fn cell(row: &PageResult, column: Column) -> String {
    match column {
        Column::PageTitle => row.title.clone(),
        Column::PageUrl => row.url.clone(),
        Column::DeploymentType => row.deployment.to_string(),
        Column::UserRole => row
            .roles
            .as_ref()
            .map(|f| render_list(f, NO_ROLES_FOUND))
            .unwrap_or_default(),
        Column::FunctionalArea => row
            .functional_area
            .as_ref()
            .map(|f| f.render_with(NO_AREA_FOUND, String::clone))
            .unwrap_or_default(),
        Column::Topics => row
            .topics
            .as_ref()
            .map(|f| render_list(f, NO_TOPICS_FOUND))
            .unwrap_or_default(),
        Column::Keywords => row
            .keywords
            .as_ref()
            .map(|f| f.render_with(NO_KEYWORDS_FOUND, |k| render_keywords(k)))
            .unwrap_or_default(),
        Column::Content => row.content.to_string(),
    }
}

/// Write `report` as CSV to `writer`.
pub fn write_csv<W: Write>(report: &Report, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(report.columns.iter().map(|c| c.header()))?;
    for row in &report.rows {
        wtr.write_record(report.columns.iter().map(|&c| cell(row, c)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// JSON value of one cell; list fields become arrays when they hold data.
fn json_cell(row: &PageResult, column: Column) -> Value {
    let list = |field: Option<&Field<Vec<String>>>| match field {
        Some(Field::Value(items)) => Value::from(items.clone()),
        _ => Value::from(cell(row, column)),
    };
    match column {
        Column::UserRole => list(row.roles.as_ref()),
        Column::Topics => list(row.topics.as_ref()),
        Column::Keywords => list(row.keywords.as_ref()),
        _ => Value::from(cell(row, column)),
    }
}

#[derive(Serialize)]
struct JsonExport {
    summary: ExportSummary,
    pages: Vec<Map<String, Value>>,
}

/// Counts reported alongside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total_pages: usize,
    pub fetch_failures: usize,
    pub cancelled: bool,
}

impl ExportSummary {
    #[must_use]
    pub fn of(report: &Report) -> Self {
        Self {
            total_pages: report.len(),
            fetch_failures: report.fetch_failures(),
            cancelled: report.cancelled,
        }
    }
}

/// Write `report` as pretty-printed JSON to `writer`.
pub fn write_json<W: Write>(report: &Report, writer: W) -> Result<()> {
    let pages = report
        .rows
        .iter()
        .map(|row| {
            report
                .columns
                .iter()
                .map(|&c| (c.header().to_string(), json_cell(row, c)))
                .collect()
        })
        .collect();
    let export = JsonExport {
        summary: ExportSummary::of(report),
        pages,
    };
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

/// Write `report` to `path` in `format`.
pub fn export(report: &Report, path: &Path, format: Format) -> Result<()> {
    debug!(path = %path.display(), rows = report.len(), ?format, "exporting report");
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        Format::Csv => write_csv(report, &mut writer)?,
        Format::Json => write_json(report, &mut writer)?,
    }
    writer.flush()?;
    info!(path = %path.display(), rows = report.len(), "report written");
    Ok(())
}
