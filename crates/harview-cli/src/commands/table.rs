use super::load_archive;
use crate::{OutputFormat, csv_field};
use anyhow::Result;
use harview_core::Archive;
use harview_core::analysis::{self, Row, Summary};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Summary headline plus one row per entry
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub summary: Summary,
    pub rows: Vec<Row>,
}

impl TableReport {
    /// The whole archive, or only `page`: its own summary and its entries
    pub fn from_archive(archive: &Archive, page: Option<&str>) -> Result<Self> {
        let report = match page {
            Some(page_id) => Self {
                summary: analysis::summary_for_page(archive, page_id)?,
                rows: analysis::rows_for_page(archive, page_id)?,
            },
            None => Self {
                summary: analysis::summary(archive)?,
                rows: analysis::rows(archive)?,
            },
        };
        Ok(report)
    }
}

pub fn execute(file: &Path, page: Option<&str>, format: OutputFormat) -> Result<()> {
    tracing::info!("Building request table for HAR file: {}", file.display());

    let archive = load_archive(file)?;

    let mut out = io::stdout().lock();
    write_report(&archive, page, format, &mut out)
}

pub fn write_report<W: Write>(
    archive: &Archive,
    page: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => output_json(&TableReport::from_archive(archive, page)?, out),
        OutputFormat::Table => output_table(&TableReport::from_archive(archive, page)?, out),
        OutputFormat::Pretty => {
            analysis::render_table(archive, page, out)?;
            Ok(())
        }
    }
}

fn output_json<W: Write>(report: &TableReport, out: &mut W) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn output_table<W: Write>(report: &TableReport, out: &mut W) -> Result<()> {
    writeln!(out, "Method,Resource,Status,Status Text,Size (KB),Duration (s)")?;
    for row in &report.rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&row.method),
            csv_field(&row.resource),
            row.status,
            csv_field(&row.status_text),
            row.size_kb,
            row.duration_seconds
        )?;
    }
    Ok(())
}
