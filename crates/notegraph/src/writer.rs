use anyhow::{Context, Result};
use futures::{stream, StreamExt, TryStreamExt};
use notegraph_core::OutputCollection;
use std::path::Path;

/// Cap on files written at once, to stay clear of descriptor limits on
/// large graphs.
const MAX_CONCURRENT_WRITES: usize = 64;

/// Remove everything under `dir` and recreate it empty.
///
/// Clearing first is what makes renamed or deleted notes disappear from the
/// destination.
pub async fn clear_output_dir(dir: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => tracing::info!("Cleared output directory {}", dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).with_context(|| format!("failed to clear {}", dir.display())),
    }
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))
}

/// Write every note under `dir`, creating namespace directories as needed.
/// Existing files at the same paths are overwritten. Returns the number of
/// files written.
pub async fn write_outputs(dir: &Path, outputs: &OutputCollection) -> Result<usize> {
    let written: Vec<()> = stream::iter(outputs.iter())
        .map(|(key, content)| write_note(dir, key, content))
        .buffer_unordered(MAX_CONCURRENT_WRITES)
        .try_collect()
        .await?;
    tracing::info!("Wrote {} notes to {}", written.len(), dir.display());
    Ok(written.len())
}

async fn write_note(dir: &Path, key: &str, content: &str) -> Result<()> {
    let path = dir.join(key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", key);
    Ok(())
}
