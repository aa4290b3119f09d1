//! CLI for the wadpack web-app packager.

mod package;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wadpack_core::config::{self, WadpackConfig};
use wadpack_core::packager::PackagerOptions;
use wadpack_core::paths;

use package::run_package;

/// Generate desktop launchers that open websites in their own app window.
#[derive(Debug, Parser)]
#[command(name = "wadpack")]
#[command(about = "wadpack: package websites as desktop web apps", long_about = None)]
pub struct Cli {
    /// JSON list of {"app_url", "app_name"} objects.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Base directory for generated app bundles.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory to place .desktop launchers in (default: your desktop).
    #[arg(long, value_name = "DIR")]
    pub desktop_dir: Option<PathBuf>,

    /// Also install launchers into this application menu directory.
    #[arg(long, value_name = "DIR", conflicts_with = "no_apps_install")]
    pub apps_dir: Option<PathBuf>,

    /// Do not copy launchers into the application menu.
    #[arg(long)]
    pub no_apps_install: bool,

    /// Also register a handler that opens http(s) links in an app window.
    #[arg(long)]
    pub url_handler: bool,

    /// Use this settings file instead of ~/.config/wadpack/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Returns `Ok(false)` when some records (or the URL handler) failed.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let options = cli.packager_options(&cfg)?;
        tracing::debug!("packager options: {:?}", options);
        run_package(&cli.input, options, &cfg.runtime, cli.url_handler)
    }

    /// Output locations: flags first, then the settings file, then XDG defaults.
    pub fn packager_options(&self, cfg: &WadpackConfig) -> Result<PackagerOptions> {
        let output_dir = match self.output.as_ref().or(cfg.output_dir.as_ref()) {
            Some(dir) => dir.clone(),
            None => paths::default_output_dir()?,
        };
        let desktop_dir = match self.desktop_dir.as_ref().or(cfg.desktop_dir.as_ref()) {
            Some(dir) => dir.clone(),
            None => paths::desktop_dir()?,
        };
        let apps_dir = if self.no_apps_install {
            None
        } else if let Some(dir) = &self.apps_dir {
            Some(dir.clone())
        } else if !cfg.install_menu_entry {
            None
        } else {
            match &cfg.apps_dir {
                Some(dir) => Some(dir.clone()),
                None => Some(paths::default_apps_dir()?),
            }
        };

        Ok(PackagerOptions {
            output_dir: paths::absolute(&output_dir)?,
            desktop_dir: paths::absolute(&desktop_dir)?,
            apps_dir: apps_dir.map(|d| paths::absolute(&d)).transpose()?,
            categories: cfg.categories.clone(),
        })
    }
}

#[cfg(test)]
mod tests;
