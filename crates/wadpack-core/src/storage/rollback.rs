//! RAII guard that undoes a record's finalized outputs unless committed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

enum Tracked {
    File(PathBuf),
    Dir(PathBuf),
    /// `path` replaced an earlier file now kept at `backup`.
    ReplacedFile { path: PathBuf, backup: PathBuf },
    /// `path` replaced an earlier directory now kept at `backup`.
    ReplacedDir { path: PathBuf, backup: PathBuf },
}

/// Tracks paths finalized for one record. Dropping it without
/// [`Rollback::commit`] undoes them, newest first: new paths are deleted and
/// replaced ones get their backup renamed back. Committing deletes the
/// backups.
#[derive(Default)]
pub struct Rollback {
    tracked: Vec<Tracked>,
}

impl Rollback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_file(&mut self, path: PathBuf) {
        self.tracked.push(Tracked::File(path));
    }

    pub fn track_dir(&mut self, path: PathBuf) {
        self.tracked.push(Tracked::Dir(path));
    }

    pub fn track_replaced_file(&mut self, path: PathBuf, backup: PathBuf) {
        self.tracked.push(Tracked::ReplacedFile { path, backup });
    }

    pub fn track_replaced_dir(&mut self, path: PathBuf, backup: PathBuf) {
        self.tracked.push(Tracked::ReplacedDir { path, backup });
    }

    /// Keeps everything tracked so far and drops the backups.
    pub fn commit(mut self) {
        for tracked in self.tracked.drain(..) {
            let (backup, result) = match tracked {
                Tracked::ReplacedFile { backup, .. } => {
                    let r = fs::remove_file(&backup);
                    (backup, r)
                }
                Tracked::ReplacedDir { backup, .. } => {
                    let r = fs::remove_dir_all(&backup);
                    (backup, r)
                }
                Tracked::File(_) | Tracked::Dir(_) => continue,
            };
            report(&backup, result, "removed backup", "could not remove backup");
        }
    }
}

fn report(path: &Path, result: io::Result<()>, done: &str, failed: &str) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "{}", done),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "{}", failed),
    }
}

fn restore_dir(path: &Path, backup: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(backup, path)
}

impl Drop for Rollback {
    fn drop(&mut self) {
        for tracked in self.tracked.drain(..).rev() {
            let (path, result) = match tracked {
                Tracked::File(p) => {
                    let r = fs::remove_file(&p);
                    (p, r)
                }
                Tracked::Dir(p) => {
                    let r = fs::remove_dir_all(&p);
                    (p, r)
                }
                Tracked::ReplacedFile { path, backup } => {
                    let r = fs::rename(&backup, &path);
                    (path, r)
                }
                Tracked::ReplacedDir { path, backup } => {
                    let r = restore_dir(&path, &backup);
                    (path, r)
                }
            };
            report(&path, result, "rolled back", "rollback failed");
        }
    }
}
