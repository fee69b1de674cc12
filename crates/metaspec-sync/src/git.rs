//! Shallow git clones.

use std::io::ErrorKind;
use std::path::Path;

use tokio::process::Command;

use crate::SyncError;

/// Clone `url` into `dest` with `git clone --depth 1`.
pub async fn shallow_clone(url: &str, dest: &Path) -> Result<(), SyncError> {
    tracing::info!(url, dest = %dest.display(), "cloning repository");

    let output = Command::new("git")
        .args(["clone", "--depth", "1", url])
        .arg(dest)
        .output()
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => SyncError::GitMissing,
            _ => SyncError::Io {
                path: dest.to_path_buf(),
                source: e,
            },
        })?;

    if !output.status.success() {
        return Err(SyncError::Git {
            url: url.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}
