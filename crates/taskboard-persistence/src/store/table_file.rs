//! Whole-file reads and replacements for the JSON table.

use std::io::Write;
use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};
use tempfile::NamedTempFile;

pub async fn read_file(path: &Path) -> TaskboardResult<Vec<u8>> {
    let data = tokio::fs::read(path).await?;
    tracing::debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Replace `path` with `data`. The bytes go to a sibling temp file that is
/// synced and then persisted over the target, so readers see the old table
/// or the new one.
pub async fn replace_file(path: &Path, data: Vec<u8>) -> TaskboardResult<()> {
    let target = path.to_path_buf();
    let len = data.len();

    tokio::task::spawn_blocking(move || -> TaskboardResult<()> {
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&data)?;
        temp.as_file().sync_all()?;
        temp.persist(&target).map_err(|e| TaskboardError::Io(e.error))?;
        Ok(())
    })
    .await
    .map_err(|e| TaskboardError::Internal(format!("table write task failed: {}", e)))??;

    tracing::debug!("Replaced {} ({} bytes)", path.display(), len);
    Ok(())
}
