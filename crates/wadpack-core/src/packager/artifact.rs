//! What packaging one app leaves on disk.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Files generated for one app. Only `desktop_entry` is user facing; the
/// rest is the bundle it launches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    pub app_name: String,
    pub app_url: String,
    pub slug: String,
    pub desktop_entry: PathBuf,
    /// Copy installed into the application menu, if enabled.
    pub menu_entry: Option<PathBuf>,
    pub app_dir: PathBuf,
    pub launcher: PathBuf,
    pub config: PathBuf,
    pub icon: PathBuf,
}

/// Bundle paths for a slug under the output dir.
pub(super) struct BundleLayout {
    pub app_dir: PathBuf,
    pub launcher: PathBuf,
    pub config: PathBuf,
    pub icon: PathBuf,
}

pub(super) const LAUNCHER_FILE: &str = "launch.sh";
pub(super) const CONFIG_FILE: &str = "config.json";

impl BundleLayout {
    pub(super) fn new(output_dir: &Path, slug: &str) -> Self {
        let app_dir = output_dir.join(slug);
        Self {
            launcher: app_dir.join(LAUNCHER_FILE),
            config: app_dir.join(CONFIG_FILE),
            icon: app_dir.join(icon_file_name(slug)),
            app_dir,
        }
    }
}

pub(super) fn icon_file_name(slug: &str) -> String {
    format!("{slug}.svg")
}

/// `config.json` written next to each launcher, for runtimes that read their
/// settings from a file (`{config}` placeholder).
#[derive(Debug, Serialize)]
pub(super) struct AppConfigFile<'a> {
    pub app_name: &'a str,
    pub app_url: &'a str,
    pub icon_path: &'a Path,
}
