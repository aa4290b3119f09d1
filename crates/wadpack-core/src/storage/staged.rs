//! App bundle directories assembled off to the side and renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Hidden `.<name>.part` directory next to the final bundle path.
/// Removed on drop unless [`StagedDir::finalize`] succeeded.
pub struct StagedDir {
    staging: PathBuf,
    done: bool,
}

impl StagedDir {
    /// Creates a fresh staging directory for `<parent>/<name>`, clearing any
    /// leftover from an interrupted run.
    pub fn create(parent: &Path, name: &str) -> io::Result<Self> {
        let staging = parent.join(format!(".{name}{}", super::TEMP_SUFFIX));
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir(&staging)?;
        Ok(StagedDir {
            staging,
            done: false,
        })
    }

    /// Where files are written before finalizing.
    pub fn path(&self) -> &Path {
        &self.staging
    }

    /// Moves the staged directory to `final_path`.
    ///
    /// An existing bundle at `final_path` is renamed to its backup path
    /// rather than deleted; the backup is returned so the caller can restore
    /// or discard it. If the final rename fails the old bundle is put back.
    pub fn finalize(mut self, final_path: &Path) -> io::Result<Option<PathBuf>> {
        let backup = if final_path.exists() {
            let backup = super::backup_path(final_path);
            if backup.exists() {
                fs::remove_dir_all(&backup)?;
            }
            tracing::debug!(path = %final_path.display(), "replacing existing app bundle");
            fs::rename(final_path, &backup)?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(&self.staging, final_path) {
            if let Some(backup) = &backup {
                if let Err(restore) = fs::rename(backup, final_path) {
                    tracing::warn!(path = %final_path.display(), error = %restore, "could not restore app bundle");
                }
            }
            return Err(e);
        }
        self.done = true;
        Ok(backup)
    }
}

impl Drop for StagedDir {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.staging) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.staging.display(), error = %e, "could not remove staging dir");
            }
        }
    }
}
