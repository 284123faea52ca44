use super::{Analyzer, RowAnalyzer, SummaryAnalyzer};
use crate::Result;
use crate::har::Archive;
use std::io::Write;

/// Write the summary headline followed by one fixed-width line per entry,
/// laid out like a browser's network panel. With `page_id` both the
/// headline and the lines cover only that page.
pub fn render_table<W: Write>(archive: &Archive, page_id: Option<&str>, out: &mut W) -> Result<()> {
    let (summary, rows) = match page_id {
        Some(id) => (
            SummaryAnalyzer::for_page(id).analyze(archive)?,
            RowAnalyzer::for_page(id).analyze(archive)?,
        ),
        None => (
            SummaryAnalyzer::first_page().analyze(archive)?,
            RowAnalyzer::all().analyze(archive)?,
        ),
    };

    writeln!(out, "{}", summary.headline())?;
    writeln!(out)?;
    for row in &rows {
        writeln!(out, "{}", row.console_line())?;
    }

    Ok(())
}
