//! Default output locations (XDG base dirs and the user's desktop).

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Where generated app bundles live: `~/.local/share/wadpack/apps`.
pub fn default_output_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::new()?;
    Ok(xdg_dirs.get_data_home().join("wadpack").join("apps"))
}

/// The user's application menu directory: `~/.local/share/applications`.
pub fn default_apps_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::new()?;
    Ok(xdg_dirs.get_data_home().join("applications"))
}

/// Resolves the desktop directory.
///
/// Order: `$XDG_DESKTOP_DIR`, then `XDG_DESKTOP_DIR` from
/// `$XDG_CONFIG_HOME/user-dirs.dirs`, then `$HOME/Desktop`.
pub fn desktop_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let user_dirs = xdg::BaseDirectories::new()
        .ok()
        .map(|d| d.get_config_home().join("user-dirs.dirs"))
        .and_then(|p| fs::read_to_string(p).ok());

    resolve_desktop_dir(
        std::env::var_os("XDG_DESKTOP_DIR"),
        user_dirs.as_deref(),
        home.as_deref(),
    )
    .context("cannot determine desktop directory; set HOME or pass --desktop-dir")
}

/// Makes `path` absolute against the current directory. Generated launchers
/// and desktop entries embed these paths, so they must not be relative.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    Ok(cwd.join(path))
}

fn resolve_desktop_dir(
    env_value: Option<OsString>,
    user_dirs: Option<&str>,
    home: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(v) = env_value.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(v));
    }
    let home = home?;
    user_dirs
        .and_then(|contents| parse_user_dirs_desktop(contents, home))
        .or_else(|| Some(home.join("Desktop")))
}

/// Extracts `XDG_DESKTOP_DIR` from a `user-dirs.dirs` file, expanding `$HOME`.
fn parse_user_dirs_desktop(contents: &str, home: &Path) -> Option<PathBuf> {
    let value = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| l.strip_prefix("XDG_DESKTOP_DIR="))?;
    let value = value.trim().trim_matches('"');
    if value.is_empty() {
        return None;
    }
    match value.strip_prefix("$HOME") {
        Some(rest) => Some(home.join(rest.trim_start_matches('/'))),
        None if value.starts_with('/') => Some(PathBuf::from(value)),
        None => None,
    }
}
