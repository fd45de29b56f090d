//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::debug;

/// Ensure a directory exists, creating it and any missing parents.
/// An empty path (e.g. the parent of a bare file name) is a no-op.
pub async fn ensure_dir(dir: &std::path::Path) -> anyhow::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {}", dir.display(), e))?;
    debug!(dir = %dir.display(), "data directory ensured");
    Ok(())
}
