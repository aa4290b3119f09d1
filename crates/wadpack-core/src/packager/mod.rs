//! App packaging: one manifest record in, one desktop launcher out.
//!
//! For each app the packager writes a bundle directory under the output dir
//! (`launch.sh`, `config.json`, `<slug>.svg`) and a `<slug>.desktop` entry on
//! the desktop, optionally copied into the application menu. A record either
//! produces all of these or none: the bundle is staged and renamed into place,
//! entries are written atomically, and a failure rolls back what was already
//! finalized.
//!
//! Within one [`Packager`] the first record to claim a slug wins; later
//! records mapping to the same slug fail with
//! [`PackagingError::DuplicateName`] instead of overwriting it.

mod artifact;
mod error;
mod url_handler;

pub use artifact::PackagedArtifact;
pub use error::PackagingError;
pub use url_handler::{URL_HANDLER_DIR, URL_HANDLER_FILE};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::desktop_entry::{self, DesktopEntry};
use crate::icon;
use crate::manifest::AppSpec;
use crate::naming;
use crate::runtime::{LaunchRequest, LaunchRuntime, LaunchTarget};
use crate::storage::{self, Rollback, StagedDir};

use artifact::{icon_file_name, AppConfigFile, BundleLayout, CONFIG_FILE, LAUNCHER_FILE};
use error::write_err;

/// Where packaged apps go. Paths should be absolute: they end up inside the
/// generated desktop entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerOptions {
    /// Base directory for app bundles.
    pub output_dir: PathBuf,
    /// Directory receiving the `.desktop` launchers.
    pub desktop_dir: PathBuf,
    /// Application menu directory; `None` disables menu installation.
    pub apps_dir: Option<PathBuf>,
    pub categories: Vec<String>,
}

pub struct Packager<R> {
    options: PackagerOptions,
    runtime: R,
    /// slug → manifest index of the record that claimed it.
    claimed: HashMap<String, usize>,
}

impl<R: LaunchRuntime> Packager<R> {
    pub fn new(options: PackagerOptions, runtime: R) -> Self {
        Self {
            options,
            runtime,
            claimed: HashMap::new(),
        }
    }

    /// Packages one app.
    pub fn package(&mut self, spec: &AppSpec) -> Result<PackagedArtifact, PackagingError> {
        let url = validate_url(&spec.app_url)?;
        let slug = naming::app_slug(&spec.app_name).ok_or_else(|| PackagingError::EmptyName {
            name: spec.app_name.clone(),
        })?;
        if let Some(&first_index) = self.claimed.get(&slug) {
            return Err(PackagingError::DuplicateName {
                name: spec.app_name.clone(),
                slug,
                first_index,
            });
        }

        let layout = BundleLayout::new(&self.options.output_dir, &slug);
        let command = self.runtime.command(&LaunchRequest {
            target: LaunchTarget::Site(&spec.app_url),
            name: &spec.app_name,
            wm_class: &spec.app_name,
            config_path: Some(&layout.config),
        })?;
        self.claimed.insert(slug.clone(), spec.index);

        self.prepare_dirs()?;
        let config = serde_json::to_string_pretty(&AppConfigFile {
            app_name: &spec.app_name,
            app_url: &spec.app_url,
            icon_path: &layout.icon,
        })?;
        let mut rollback = self.stage_bundle(
            &slug,
            &layout,
            &icon::label_for_url(&url),
            &command.render_script(),
            Some(&config),
        )?;

        let entry = DesktopEntry {
            name: spec.app_name.clone(),
            comment: Some(format!("Web app: {}", spec.app_name)),
            exec: desktop_entry::exec_line(&layout.launcher, None),
            icon: Some(layout.icon.to_string_lossy().into_owned()),
            categories: self.options.categories.clone(),
            startup_wm_class: Some(spec.app_name.clone()),
            mime_types: Vec::new(),
            extensions: vec![(desktop_entry::URL_KEY.to_string(), spec.app_url.clone())],
        }
        .to_string();

        let file_name = naming::desktop_file_name(&slug);
        let desktop_path = self.options.desktop_dir.join(&file_name);
        write_entry(&mut rollback, &desktop_path, &entry)?;

        let menu_entry = match &self.options.apps_dir {
            Some(dir) => {
                let path = dir.join(&file_name);
                write_entry(&mut rollback, &path, &entry)?;
                Some(path)
            }
            None => None,
        };

        rollback.commit();
        tracing::info!(
            index = spec.index,
            name = %spec.app_name,
            entry = %desktop_path.display(),
            "packaged app"
        );

        Ok(PackagedArtifact {
            app_name: spec.app_name.clone(),
            app_url: spec.app_url.clone(),
            slug,
            desktop_entry: desktop_path,
            menu_entry,
            app_dir: layout.app_dir,
            launcher: layout.launcher,
            config: layout.config,
            icon: layout.icon,
        })
    }

    fn prepare_dirs(&self) -> Result<(), PackagingError> {
        ensure_dir(&self.options.output_dir)?;
        ensure_dir(&self.options.desktop_dir)?;
        if let Some(dir) = &self.options.apps_dir {
            ensure_dir(dir)?;
        }
        Ok(())
    }

    /// Writes the bundle into `layout.app_dir` and moves it into place. The
    /// returned guard removes the bundle again unless committed, putting back
    /// any bundle it replaced.
    fn stage_bundle(
        &self,
        bundle_name: &str,
        layout: &BundleLayout,
        icon_label: &str,
        script: &str,
        config: Option<&str>,
    ) -> Result<Rollback, PackagingError> {
        let staged = StagedDir::create(&self.options.output_dir, bundle_name)
            .map_err(write_err(&layout.app_dir))?;

        let svg = icon::render_card_svg(icon_label);
        let icon_path = staged.path().join(icon_file_name(bundle_name));
        storage::write_file(&icon_path, svg.as_bytes(), false).map_err(write_err(&layout.icon))?;
        if let Some(config) = config {
            storage::write_file(&staged.path().join(CONFIG_FILE), config.as_bytes(), false)
                .map_err(write_err(&layout.config))?;
        }
        storage::write_file(&staged.path().join(LAUNCHER_FILE), script.as_bytes(), true)
            .map_err(write_err(&layout.launcher))?;

        let replaced = staged
            .finalize(&layout.app_dir)
            .map_err(write_err(&layout.app_dir))?;
        let mut rollback = Rollback::new();
        match replaced {
            Some(backup) => rollback.track_replaced_dir(layout.app_dir.clone(), backup),
            None => rollback.track_dir(layout.app_dir.clone()),
        }
        Ok(rollback)
    }
}

/// Atomically writes a desktop entry, keeping a previous one restorable
/// through `rollback`.
fn write_entry(rollback: &mut Rollback, path: &Path, entry: &str) -> Result<(), PackagingError> {
    let backup = storage::backup_file(path).map_err(write_err(path))?;
    let written = storage::write_atomic(path, entry.as_bytes(), true).map_err(write_err(path));
    match backup {
        Some(backup) => rollback.track_replaced_file(path.to_path_buf(), backup),
        None if written.is_ok() => rollback.track_file(path.to_path_buf()),
        None => {}
    }
    written
}

fn ensure_dir(path: &Path) -> Result<(), PackagingError> {
    fs::create_dir_all(path).map_err(|source| PackagingError::OutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts absolute `http`/`https` URLs with a host.
fn validate_url(raw: &str) -> Result<Url, PackagingError> {
    let invalid = |reason: String| PackagingError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}
