//! `wadpack -i <manifest>` – package every app in the manifest.

use anyhow::{bail, Result};
use std::path::Path;
use wadpack_core::batch::{self, BatchEvent};
use wadpack_core::config::RuntimeConfig;
use wadpack_core::manifest;
use wadpack_core::packager::{Packager, PackagerOptions};
use wadpack_core::runtime::CommandTemplate;

pub fn run_package(
    input: &Path,
    options: PackagerOptions,
    runtime: &RuntimeConfig,
    url_handler: bool,
) -> Result<bool> {
    if url_handler && options.apps_dir.is_none() {
        bail!("--url-handler needs an application menu directory; drop --no-apps-install or pass --apps-dir");
    }

    let specs = manifest::load_manifest(input)?;
    tracing::info!(input = %input.display(), count = specs.len(), "loaded manifest");

    let mut packager = Packager::new(options, CommandTemplate::from_config(runtime));
    let report = batch::run_batch(&mut packager, specs, |event| match event {
        BatchEvent::Started(spec) => println!("▶ Packaging: {} ({})", spec.app_name, spec.app_url),
        BatchEvent::Finished(outcome) => match &outcome.result {
            Ok(artifact) => {
                println!("  ✓ Desktop: {}", artifact.desktop_entry.display());
                if let Some(menu) = &artifact.menu_entry {
                    println!("  ✓ Menu: {}", menu.display());
                }
            }
            Err(e) => println!("  ! Failed: {e}"),
        },
    });

    let mut ok = report.is_success();
    if url_handler {
        println!("▶ Packaging: URL handler");
        match packager.package_url_handler() {
            Ok(path) => println!("  ✓ Menu: {}", path.display()),
            Err(e) => {
                println!("  ! Failed: {e}");
                eprintln!("url handler: {e}");
                ok = false;
            }
        }
    }

    if !report.is_success() {
        eprintln!();
        eprintln!("Failed apps:");
        for (spec, err) in report.failures() {
            eprintln!("  {} (entry {}): {}", spec.app_name, spec.index, err);
        }
    }
    println!();
    println!("{}", report.summary());
    Ok(ok)
}
