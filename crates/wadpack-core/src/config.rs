use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Program used to open each packaged site in its own window.
///
/// `args` may contain the placeholders `{url}`, `{name}`, `{wm_class}` and
/// `{config}` (path of the generated per-app `config.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Directory the launcher changes into before starting the program.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            program: "chromium".to_string(),
            args: vec!["--app={url}".to_string(), "--class={wm_class}".to_string()],
            working_dir: None,
        }
    }
}

/// Global configuration loaded from `~/.config/wadpack/config.toml`.
///
/// Directory fields left unset are resolved at runtime (see [`crate::paths`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WadpackConfig {
    /// Base directory for generated app bundles (launcher, icon, config.json).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Where desktop entries are placed. Defaults to the user's desktop.
    #[serde(default)]
    pub desktop_dir: Option<PathBuf>,
    /// Application menu directory. Defaults to `~/.local/share/applications`.
    #[serde(default)]
    pub apps_dir: Option<PathBuf>,
    /// Also install each desktop entry into the application menu.
    #[serde(default = "default_install_menu_entry")]
    pub install_menu_entry: bool,
    /// `Categories=` written into every desktop entry.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

fn default_install_menu_entry() -> bool {
    true
}

fn default_categories() -> Vec<String> {
    vec!["Network".to_string(), "WebBrowser".to_string()]
}

impl Default for WadpackConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            desktop_dir: None,
            apps_dir: None,
            install_menu_entry: default_install_menu_entry(),
            categories: default_categories(),
            runtime: RuntimeConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wadpack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WadpackConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WadpackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file, which must exist.
pub fn load_from(path: &Path) -> Result<WadpackConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let cfg: WadpackConfig = toml::from_str(&data)
        .with_context(|| format!("parse config file: {}", path.display()))?;
    Ok(cfg)
}
