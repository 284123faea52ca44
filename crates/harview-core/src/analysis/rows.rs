use super::format::{format_kb, format_seconds, resource_name};
use super::summary::content_size;
use super::{Analyzer, Row};
use crate::Result;
use crate::har::{Archive, Entry};

/// Builds one display row per entry, optionally limited to one page
pub struct RowAnalyzer {
    page_id: Option<String>,
}

impl RowAnalyzer {
    pub fn all() -> Self {
        Self { page_id: None }
    }

    pub fn for_page(page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
        }
    }
}

impl Default for RowAnalyzer {
    fn default() -> Self {
        Self::all()
    }
}

impl Analyzer for RowAnalyzer {
    type Output = Vec<Row>;

    fn analyze(&self, archive: &Archive) -> Result<Self::Output> {
        tracing::debug!("Building rows for {} entries", archive.entries.len());

        if let Some(page_id) = &self.page_id
            && archive.page(page_id).is_none()
        {
            tracing::warn!("No page with id '{}' in archive", page_id);
        }

        archive
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                self.page_id
                    .as_deref()
                    .is_none_or(|page_id| entry.pageref == page_id)
            })
            .map(|(idx, entry)| build_row(idx, entry))
            .collect()
    }
}

fn build_row(idx: usize, entry: &Entry) -> Result<Row> {
    Ok(Row {
        method: entry.request.method.clone(),
        resource: resource_name(&entry.request.url),
        status: entry.response.status.to_string(),
        status_text: entry.response.status_text.clone(),
        size_kb: format_kb(content_size(idx, entry)?),
        duration_seconds: format_seconds(entry.time),
    })
}
