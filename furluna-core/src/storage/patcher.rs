//! Atomic read-modify-write of a page's listing region.

use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use super::region::{self, locate_region};
use super::{PatchAction, PatchError, PatchOutcome};
use crate::config::MissingRegionPolicy;

/// Rewrites the listing region of static pages.
///
/// Patches are serialized through an internal lock, so sharing one patcher
/// between the startup task, a periodic refresh, and the CLI never loses an
/// update to interleaved read-modify-write cycles.
#[derive(Debug, Default)]
pub struct RegionPatcher {
    missing_region: MissingRegionPolicy,
    write_lock: Mutex<()>,
}

impl RegionPatcher {
    /// Creates a patcher with the given missing-region policy.
    pub fn new(missing_region: MissingRegionPolicy) -> Self {
        Self {
            missing_region,
            write_lock: Mutex::new(()),
        }
    }

    /// Replaces the listing region of `path` with `fragment`.
    ///
    /// The new page is written to a temporary file in the same directory and
    /// renamed over the original, so readers see either the old or the new
    /// page. When the content would not change, nothing is written.
    ///
    /// # Errors
    /// - `PatchError::InvalidFragment` - Fragment does not end with exactly one end marker
    /// - `PatchError::RegionNotFound` - No region and the policy is `Fail`
    /// - `PatchError::Io` - Reading, writing or renaming failed; the page is untouched
    pub async fn patch(&self, path: &Path, fragment: &str) -> Result<PatchOutcome, PatchError> {
        region::validate_fragment(fragment)
            .map_err(|reason| PatchError::InvalidFragment { reason })?;

        let _guard = self.write_lock.lock().await;

        let text = fs::read_to_string(path)
            .await
            .map_err(|source| PatchError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let Some((patched, action)) = region::splice(&text, fragment, self.missing_region) else {
            let reason = locate_region(&text)
                .describe()
                .unwrap_or_else(|| "region not found".to_string());
            tracing::warn!(path = %path.display(), %reason, "listing region missing, page left untouched");
            return Err(PatchError::RegionNotFound {
                path: path.to_path_buf(),
                reason,
            });
        };

        if action == PatchAction::Unchanged {
            tracing::debug!(path = %path.display(), "listing region already up to date");
            return Ok(PatchOutcome {
                action,
                bytes: patched.len(),
            });
        }

        let bytes = patched.len();
        write_atomically(path, patched.into_bytes())
            .await
            .map_err(|source| PatchError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            ?action,
            bytes,
            "listing region written"
        );

        Ok(PatchOutcome { action, bytes })
    }
}

/// Writes `contents` to a temporary sibling of `path`, then renames it over
/// `path`. The temporary file is deleted on any failure.
///
/// Runs on the blocking pool, so a cancelled caller cannot interrupt it
/// half way.
async fn write_atomically(path: &Path, contents: Vec<u8>) -> std::io::Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp = tempfile::Builder::new()
            .prefix(".furluna-")
            .suffix(".tmp")
            .tempfile_in(&dir)?;
        temp.write_all(&contents)?;
        temp.as_file().sync_all()?;

        if let Ok(metadata) = std::fs::metadata(&path) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }

        temp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(std::io::Error::other)?
}
