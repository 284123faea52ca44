pub mod completion;
pub mod info;
pub mod summary;
pub mod table;

use anyhow::{Context, Result};
use harview_core::Archive;
use harview_core::har::ArchiveDecoder;
use std::path::Path;

/// Decode the HAR file named on the command line (`-` for stdin)
pub fn load_archive(file: &Path) -> Result<Archive> {
    ArchiveDecoder::from_file(file)
        .with_context(|| format!("Failed to load HAR from {}", file.display()))
}
