use super::load_archive;
use crate::{OutputFormat, csv_field};
use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use harview_core::Archive;
use harview_core::har::Page;
use harview_core::analysis::format::format_seconds;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Producer details and the pages recorded in an archive
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveInfo {
    pub creator: Tool,
    pub browser: Tool,
    pub entry_count: usize,
    pub pages: Vec<PageInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub id: String,
    pub title: String,
    pub started: String,
    /// `started` normalized to UTC, when it parses
    pub started_utc: Option<String>,
    pub on_content_load_seconds: Option<String>,
    pub on_load_seconds: Option<String>,
    pub entry_count: usize,
    /// From page start until the last of its requests finished
    pub requests_span_seconds: Option<String>,
}

impl ArchiveInfo {
    pub fn from_archive(archive: &Archive) -> Self {
        let pages = archive
            .pages
            .iter()
            .map(|page| PageInfo {
                id: page.id.clone(),
                title: page.title.clone(),
                started: page.started_date_time.clone(),
                started_utc: page.started_at().map(|started| {
                    started
                        .with_timezone(&Utc)
                        .to_rfc3339_opts(SecondsFormat::Millis, true)
                }),
                on_content_load_seconds: page.on_content_load.map(format_seconds),
                on_load_seconds: page.on_load.map(format_seconds),
                entry_count: archive.entries_for_page(&page.id).count(),
                requests_span_seconds: requests_span_ms(archive, page).map(format_seconds),
            })
            .collect();

        Self {
            creator: Tool {
                name: archive.creator.name.clone(),
                version: archive.creator.version.clone(),
            },
            browser: Tool {
                name: archive.browser.name.clone(),
                version: archive.browser.version.clone(),
            },
            entry_count: archive.entries.len(),
            pages,
        }
    }
}

/// Milliseconds from the page start to the latest `start + time` among its
/// entries. Entries whose start time does not parse are skipped.
fn requests_span_ms(archive: &Archive, page: &Page) -> Option<f64> {
    let page_start = page.started_at()?;

    archive
        .entries_for_page(&page.id)
        .filter_map(|entry| {
            let offset = entry.started_at()? - page_start;
            Some(offset.num_milliseconds() as f64 + entry.time)
        })
        .reduce(f64::max)
}

pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Reading archive details from: {}", file.display());

    let archive = load_archive(file)?;
    let info = ArchiveInfo::from_archive(&archive);

    let mut out = io::stdout().lock();
    write_info(&info, format, &mut out)
}

pub fn write_info<W: Write>(info: &ArchiveInfo, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(info)?)?;
            Ok(())
        }
        OutputFormat::Table => output_table(info, out),
        OutputFormat::Pretty => output_pretty(info, out),
    }
}

fn output_pretty<W: Write>(info: &ArchiveInfo, out: &mut W) -> Result<()> {
    use console::style;

    writeln!(out, "\n{}", style("HAR Archive").bold().cyan())?;
    writeln!(out, "{}", style("===========").cyan())?;
    writeln!(
        out,
        "  Creator:  {} {}",
        or_unknown(&info.creator.name),
        info.creator.version
    )?;
    writeln!(
        out,
        "  Browser:  {} {}",
        or_unknown(&info.browser.name),
        info.browser.version
    )?;
    writeln!(out, "  Entries:  {}", info.entry_count)?;

    if info.pages.is_empty() {
        writeln!(out, "\n  {}", style("No pages recorded").dim())?;
    }

    for page in &info.pages {
        writeln!(out, "\n{} {}", style("Page").bold(), style(&page.id).yellow())?;
        writeln!(out, "  Title:           {}", page.title)?;
        match &page.started_utc {
            Some(utc) if *utc != page.started => {
                writeln!(out, "  Started:         {} ({})", page.started, utc)?
            }
            _ => writeln!(out, "  Started:         {}", page.started)?,
        }
        writeln!(
            out,
            "  onContentLoad:   {}",
            seconds_or_dash(page.on_content_load_seconds.as_deref())
        )?;
        writeln!(
            out,
            "  onLoad:          {}",
            seconds_or_dash(page.on_load_seconds.as_deref())
        )?;
        writeln!(out, "  Entries:         {}", page.entry_count)?;
        writeln!(
            out,
            "  Requests span:   {}",
            seconds_or_dash(page.requests_span_seconds.as_deref())
        )?;
    }

    writeln!(out)?;
    Ok(())
}

fn output_table<W: Write>(info: &ArchiveInfo, out: &mut W) -> Result<()> {
    writeln!(out, "Creator,{},{}", csv_field(&info.creator.name), csv_field(&info.creator.version))?;
    writeln!(out, "Browser,{},{}", csv_field(&info.browser.name), csv_field(&info.browser.version))?;
    writeln!(out)?;
    writeln!(out, "Page,Title,Started,onContentLoad (s),onLoad (s),Entries")?;
    for page in &info.pages {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            csv_field(&page.id),
            csv_field(&page.title),
            page.started,
            page.on_content_load_seconds.as_deref().unwrap_or(""),
            page.on_load_seconds.as_deref().unwrap_or(""),
            page.entry_count
        )?;
    }
    Ok(())
}

fn or_unknown(name: &str) -> &str {
    if name.is_empty() { "unknown" } else { name }
}

fn seconds_or_dash(seconds: Option<&str>) -> String {
    seconds.map_or_else(|| "-".to_string(), |s| format!("{} s", s))
}
