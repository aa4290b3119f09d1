//! Menu entry registering the runtime as a handler for http(s) links.

use std::path::PathBuf;

use crate::desktop_entry::{self, DesktopEntry};
use crate::runtime::{LaunchRequest, LaunchRuntime, LaunchTarget};

use super::artifact::BundleLayout;
use super::{write_entry, Packager, PackagingError};

/// Bundle directory under the output dir. Contains `_`, which app slugs
/// never do, so no app can share it.
pub const URL_HANDLER_DIR: &str = "url_handler";
pub const URL_HANDLER_FILE: &str = "wadpack-url-handler.desktop";
const URL_HANDLER_CLASS: &str = "wadpack-url-handler";
const URL_HANDLER_NAME: &str = "Web App URL Handler";
const URL_HANDLER_LABEL: &str = "URL";
const URL_SCHEMES: [&str; 2] = ["x-scheme-handler/http", "x-scheme-handler/https"];

impl<R: LaunchRuntime> Packager<R> {
    /// Writes the URL handler bundle and its menu entry; returns the entry path.
    ///
    /// The launcher forwards its first argument (`%u`) to the runtime as the
    /// URL. Needs a menu directory, since handlers are looked up there.
    pub fn package_url_handler(&mut self) -> Result<PathBuf, PackagingError> {
        let apps_dir = self
            .options
            .apps_dir
            .clone()
            .ok_or(PackagingError::NoMenuDir)?;

        let command = self.runtime.command(&LaunchRequest {
            target: LaunchTarget::Forwarded,
            name: URL_HANDLER_NAME,
            wm_class: URL_HANDLER_CLASS,
            config_path: None,
        })?;

        self.prepare_dirs()?;
        let layout = BundleLayout::new(&self.options.output_dir, URL_HANDLER_DIR);
        let mut rollback = self.stage_bundle(
            URL_HANDLER_DIR,
            &layout,
            URL_HANDLER_LABEL,
            &command.render_script(),
            None,
        )?;

        let entry = DesktopEntry {
            name: URL_HANDLER_NAME.to_string(),
            comment: Some("Open web links in a dedicated app window".to_string()),
            exec: desktop_entry::exec_line(&layout.launcher, Some("%u")),
            icon: Some(layout.icon.to_string_lossy().into_owned()),
            categories: self.options.categories.clone(),
            startup_wm_class: None,
            mime_types: URL_SCHEMES.iter().map(|s| s.to_string()).collect(),
            extensions: Vec::new(),
        }
        .to_string();

        let path = apps_dir.join(URL_HANDLER_FILE);
        write_entry(&mut rollback, &path, &entry)?;
        rollback.commit();
        tracing::info!(entry = %path.display(), "installed url handler");
        Ok(path)
    }
}
