//! Display-oriented views of a decoded archive.
//!
//! Everything here reads the public model only; numbers are rendered to
//! strings with the helpers in [`format`] so output is reproducible.

pub mod format;
mod rows;
mod summary;
mod table;

pub use rows::RowAnalyzer;
pub use summary::SummaryAnalyzer;
pub use table::render_table;

use crate::har::Archive;
use serde::Serialize;

/// Page-level figures: the first page against all entries, or one page
/// against its own entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub page_title: String,
    pub entry_count: String,
    /// Sum of the response content sizes in MB, 2 decimals
    pub total_size_mb: String,
    /// Page `onLoad` in seconds, 3 decimals
    pub load_time_seconds: String,
}

impl Summary {
    /// One-line description used as the table header
    pub fn headline(&self) -> String {
        format!(
            "Metrics for: '{}', {} Requests, {}MB downloaded. Load time: {}s",
            self.page_title, self.entry_count, self.total_size_mb, self.load_time_seconds
        )
    }
}

/// Per-entry figures, one row per archive entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub method: String,
    /// Last path segment of the URL, at most 30 characters
    pub resource: String,
    pub status: String,
    pub status_text: String,
    pub size_kb: String,
    pub duration_seconds: String,
}

impl Row {
    /// Fixed-width console line
    pub fn console_line(&self) -> String {
        format!(
            "{} {:<32} {} {:<20} {:<10} {}s",
            self.method,
            self.resource,
            self.status,
            self.status_text,
            format!("{}KB", self.size_kb),
            self.duration_seconds
        )
    }
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, archive: &Archive) -> crate::Result<Self::Output>;
}

/// Summary of the archive's first page
pub fn summary(archive: &Archive) -> crate::Result<Summary> {
    SummaryAnalyzer::first_page().analyze(archive)
}

/// Summary of one page, counting only the entries that reference it
pub fn summary_for_page(archive: &Archive, page_id: &str) -> crate::Result<Summary> {
    SummaryAnalyzer::for_page(page_id).analyze(archive)
}

/// One row per entry, in archive order
pub fn rows(archive: &Archive) -> crate::Result<Vec<Row>> {
    RowAnalyzer::all().analyze(archive)
}

/// Rows for the entries that reference one page
pub fn rows_for_page(archive: &Archive, page_id: &str) -> crate::Result<Vec<Row>> {
    RowAnalyzer::for_page(page_id).analyze(archive)
}
