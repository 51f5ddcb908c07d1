//! Whole-file atomic writes for the JSON documents the bot owns.

use std::path::{Path, PathBuf};

use crate::server::error::AppError;

/// Writes `contents` to `path` so readers see either the old file or the new one.
///
/// The data is written to a sibling temporary file, flushed to disk, then renamed over
/// the target. Missing parent directories are created. If any step fails the target is
/// left untouched and the temporary file is removed.
///
/// # Arguments
/// - `path` - Destination file
/// - `contents` - Full new file contents
///
/// # Returns
/// - `Ok(())` - File replaced
/// - `Err(AppError::IoErr)` - Failed to create, write or rename the file
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(e) = write_and_sync(&tmp, contents).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }

    Ok(())
}

async fn write_and_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
