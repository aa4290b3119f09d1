//! File lifecycle for generated artifacts.
//!
//! Nothing is written at its final path directly: single files go through a
//! `.part` sibling and a rename, app bundles are assembled in a hidden staging
//! directory and renamed into place, and [`Rollback`] removes whatever a
//! failing record had already finalized. Anything a record replaces is kept
//! as a hidden `.<name>.old` sibling until the record commits, so a failed
//! record puts the previous run's files back.

mod rollback;
mod staged;

pub use rollback::Rollback;
pub use staged::StagedDir;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `app.desktop` → `app.desktop.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Suffix of the copy kept while a previous artifact is being replaced.
pub const BACKUP_SUFFIX: &str = ".old";

/// Hidden sibling holding the previous version: `app.desktop` → `.app.desktop.old`.
pub fn backup_path(final_path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    if let Some(file_name) = final_path.file_name() {
        name.push(file_name);
    }
    name.push(BACKUP_SUFFIX);
    final_path.with_file_name(name)
}

/// Copies an existing file at `path` to its [`backup_path`].
/// Returns `None` when there is nothing to keep.
pub fn backup_file(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let backup = backup_path(path);
    fs::copy(path, &backup)?;
    Ok(Some(backup))
}

/// Writes `contents` to `path` (mode 0755 when `executable`), flushing to disk.
/// Does not create parent directories.
pub fn write_file(path: &Path, contents: &[u8], executable: bool) -> io::Result<()> {
    let mut file = fs::File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    if executable {
        set_executable(path)?;
    }
    Ok(())
}

/// Writes `contents` to `<path>.part`, then renames it over `path`.
/// On failure the `.part` file is removed and `path` is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8], executable: bool) -> io::Result<()> {
    let tmp = temp_path(path);
    let result = write_file(&tmp, contents, executable).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %e, "could not remove temp file");
            }
        }
    }
    result
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
