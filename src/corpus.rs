//! Corpus enumeration: one ordered directory listing per request.

use crate::decompress::GZIP_SUFFIX;
use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One log file in the corpus.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    /// Derived from the `.gz` suffix; decides whether the raw read gets
    /// wrapped in a decompressor.
    pub compressed: bool,
}

/// List the log directory, preserving raw listing order.
///
/// No sort is applied: files are served in whatever order the OS returns
/// them. Non-file entries are skipped so every downstream open hits a
/// regular file. Any listing failure is fatal for the request.
pub async fn enumerate(dir: &Path) -> Result<Vec<FileEntry>, Error> {
    let enumeration_error = |source| Error::Enumeration {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(enumeration_error)?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(enumeration_error)? {
        let file_type = entry.file_type().await.map_err(enumeration_error)?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let compressed = name.ends_with(GZIP_SUFFIX);
        entries.push(FileEntry {
            name,
            path: entry.path(),
            compressed,
        });
    }

    debug!("enumerated {} log files in {}", entries.len(), dir.display());
    Ok(entries)
}
