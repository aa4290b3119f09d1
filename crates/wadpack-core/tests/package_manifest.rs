//! Integration test: manifest file on disk → batch run → launchers in temp dirs.

use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};
use wadpack_core::batch::{self, BatchReport};
use wadpack_core::config::RuntimeConfig;
use wadpack_core::desktop_entry;
use wadpack_core::manifest::{self, ConfigError};
use wadpack_core::packager::{Packager, PackagerOptions, PackagingError};
use wadpack_core::runtime::CommandTemplate;

fn write_manifest(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("resources.json");
    fs::write(&path, contents).unwrap();
    path
}

fn run(root: &Path, manifest_path: &Path) -> Result<BatchReport, ConfigError> {
    let specs = manifest::load_manifest(manifest_path)?;
    let mut packager = Packager::new(
        PackagerOptions {
            output_dir: root.join("generated"),
            desktop_dir: root.join("Desktop"),
            apps_dir: Some(root.join("applications")),
            categories: vec!["Network".to_string(), "WebBrowser".to_string()],
        },
        CommandTemplate::from_config(&RuntimeConfig::default()),
    );
    Ok(batch::run_batch(&mut packager, specs, |_| {}))
}

fn desktop_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(rd) => rd
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

#[test]
fn single_example_app() {
    let root = tempdir().unwrap();
    let path = write_manifest(
        &root,
        r#"[{"app_url": "https://example.com", "app_name": "Example"}]"#,
    );
    let report = run(root.path(), &path).unwrap();
    assert!(report.is_success());
    assert_eq!(report.summary(), "packaged 1 of 1");

    let desktop = root.path().join("Desktop");
    assert_eq!(desktop_files(&desktop), vec!["example.desktop"]);
    let text = fs::read_to_string(desktop.join("example.desktop")).unwrap();
    assert_eq!(desktop_entry::lookup(&text, "Name"), Some("Example"));
    assert_eq!(
        desktop_entry::lookup(&text, desktop_entry::URL_KEY),
        Some("https://example.com")
    );

    let script = fs::read_to_string(root.path().join("generated/example/launch.sh")).unwrap();
    assert!(script.contains("'--app=https://example.com'"));
    assert!(script.contains("'--class=Example'"));
    assert_eq!(
        desktop_files(&root.path().join("applications")),
        vec!["example.desktop"]
    );
}

#[test]
fn one_artifact_per_unique_name() {
    let root = tempdir().unwrap();
    let path = write_manifest(
        &root,
        r#"[
            {"app_url": "https://mail.example.com", "app_name": "Mail"},
            {"app_url": "https://calendar.example.com", "app_name": "Calendar"},
            {"app_url": "http://localhost:8080", "app_name": "Dev Server"}
        ]"#,
    );
    let report = run(root.path(), &path).unwrap();
    assert_eq!(report.packaged(), 3);
    assert_eq!(
        desktop_files(&root.path().join("Desktop")),
        vec!["calendar.desktop", "dev-server.desktop", "mail.desktop"]
    );
    let svg = fs::read_to_string(root.path().join("generated/dev-server/dev-server.svg")).unwrap();
    assert!(svg.contains(">:8080</text>"));
    // no staging leftovers
    assert_eq!(
        desktop_files(&root.path().join("generated")),
        vec!["calendar", "dev-server", "mail"]
    );
}

#[test]
fn empty_manifest_produces_nothing() {
    let root = tempdir().unwrap();
    let path = write_manifest(&root, "[]");
    let report = run(root.path(), &path).unwrap();
    assert!(report.is_success());
    assert_eq!(report.summary(), "packaged 0 of 0");
    assert!(desktop_files(&root.path().join("Desktop")).is_empty());
}

#[test]
fn truncated_manifest_is_fatal() {
    let root = tempdir().unwrap();
    let path = write_manifest(&root, r#"[{"app_url": "https://example.com""#);
    let err = run(root.path(), &path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(!root.path().join("Desktop").exists());
    assert!(!root.path().join("generated").exists());
}

#[test]
fn missing_field_is_fatal_and_names_index() {
    let root = tempdir().unwrap();
    let path = write_manifest(
        &root,
        r#"[
            {"app_url": "https://a.example.com", "app_name": "A"},
            {"app_url": "https://b.example.com"}
        ]"#,
    );
    let err = run(root.path(), &path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            index: 1,
            field: "app_name",
            ..
        }
    ));
    assert!(!root.path().join("Desktop").exists());
}

#[test]
fn duplicate_names_keep_first_and_report_second() {
    let root = tempdir().unwrap();
    let path = write_manifest(
        &root,
        r#"[
            {"app_url": "https://one.example.com", "app_name": "Docs"},
            {"app_url": "https://two.example.com", "app_name": "Docs"}
        ]"#,
    );
    let report = run(root.path(), &path).unwrap();
    assert_eq!(report.summary(), "packaged 1 of 2");

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.index, 1);
    assert!(matches!(failures[0].1, PackagingError::DuplicateName { .. }));

    let text = fs::read_to_string(root.path().join("Desktop/docs.desktop")).unwrap();
    assert_eq!(
        desktop_entry::lookup(&text, desktop_entry::URL_KEY),
        Some("https://one.example.com")
    );
}

#[test]
fn bad_record_does_not_block_the_rest() {
    let root = tempdir().unwrap();
    let path = write_manifest(
        &root,
        r#"[
            {"app_url": "notaurl", "app_name": "Broken"},
            {"app_url": "https://ok.example.com", "app_name": "Fine"}
        ]"#,
    );
    let report = run(root.path(), &path).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.summary(), "packaged 1 of 2");
    assert_eq!(
        desktop_files(&root.path().join("Desktop")),
        vec!["fine.desktop"]
    );
}
