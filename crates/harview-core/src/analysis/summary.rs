use super::format::{format_mb, format_seconds};
use super::{Analyzer, Summary};
use crate::har::{Archive, Entry, Page};
use crate::{Error, Result};

/// Summarizes the first page against every entry, or one chosen page
/// against the entries that reference it.
#[derive(Debug, Clone, Default)]
pub struct SummaryAnalyzer {
    page_id: Option<String>,
}

impl SummaryAnalyzer {
    pub fn first_page() -> Self {
        Self { page_id: None }
    }

    pub fn for_page(page_id: impl Into<String>) -> Self {
        Self {
            page_id: Some(page_id.into()),
        }
    }

    fn select<'a>(&self, archive: &'a Archive) -> Result<(&'a Page, Vec<(usize, &'a Entry)>)> {
        match &self.page_id {
            None => {
                let page = archive
                    .pages
                    .first()
                    .ok_or_else(|| Error::InvalidStructure("archive has no pages".to_string()))?;
                Ok((page, archive.entries.iter().enumerate().collect()))
            }
            Some(id) => {
                let page = archive.page(id).ok_or_else(|| {
                    Error::InvalidStructure(format!("archive has no page with id '{}'", id))
                })?;
                let entries = archive
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.pageref == *id)
                    .collect();
                Ok((page, entries))
            }
        }
    }
}

impl Analyzer for SummaryAnalyzer {
    type Output = Summary;

    fn analyze(&self, archive: &Archive) -> Result<Self::Output> {
        tracing::debug!("Summarizing HAR archive");

        let (page, entries) = self.select(archive)?;

        let on_load = page.on_load.ok_or_else(|| {
            Error::InvalidStructure(format!("page '{}' has no onLoad timing", page.id))
        })?;

        let total_size = total_content_size(entries.iter().copied())?;

        tracing::info!(
            "Summary complete: {} entries, {} bytes of content",
            entries.len(),
            total_size
        );

        Ok(Summary {
            page_title: page.title.clone(),
            entry_count: entries.len().to_string(),
            total_size_mb: format_mb(total_size),
            load_time_seconds: format_seconds(on_load),
        })
    }
}

/// Sum of the response content sizes in bytes. Entries are paired with
/// their archive index for error messages. Accumulates in `i128`, which no
/// number of `i64` sizes can overflow in practice.
pub(super) fn total_content_size<'a>(
    mut entries: impl Iterator<Item = (usize, &'a Entry)>,
) -> Result<i128> {
    entries.try_fold(0i128, |total, (idx, entry)| {
        let size = content_size(idx, entry)?;
        total
            .checked_add(i128::from(size))
            .ok_or_else(|| Error::InvalidStructure("total content size overflows".to_string()))
    })
}

pub(super) fn content_size(idx: usize, entry: &Entry) -> Result<i64> {
    entry.response.content.size.ok_or_else(|| {
        Error::InvalidStructure(format!("entry {} response content has no size", idx))
    })
}
