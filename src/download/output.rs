//! Output file handling.
//!
//! The output file is always created fresh: an existing file at the target
//! path is never truncated or appended to.

use std::path::Path;

use tokio::fs::{File, OpenOptions};
use tracing::debug;

use super::error::DownloadError;

/// Creates `path` for writing, failing if anything already exists there.
///
/// # Errors
///
/// Returns [`DownloadError::OutputExists`] when the path is taken and
/// [`DownloadError::Io`] for any other file system failure.
pub async fn create_exclusive(path: &Path) -> Result<File, DownloadError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                DownloadError::output_exists(path)
            } else {
                DownloadError::io(path, e)
            }
        })
}

/// Removes a file this run created if nothing ever reached it.
///
/// Files holding partial output are left in place for the caller.
pub(crate) async fn remove_if_empty(path: &Path) {
    let is_empty = tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.len() == 0);
    if is_empty {
        debug!(path = %path.display(), "removing empty output after failed download");
        let _ = tokio::fs::remove_file(path).await;
    }
}
