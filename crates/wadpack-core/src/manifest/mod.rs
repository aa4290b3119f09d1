//! App manifest: the JSON list of `{app_url, app_name}` records to package.
//!
//! Loading is all-or-nothing. Any unreadable file, malformed JSON or invalid
//! entry fails the whole manifest with a [`ConfigError`] naming the file and,
//! where relevant, the entry index and field.

mod error;
mod parse;

pub use error::ConfigError;

use std::path::Path;

/// One record of the manifest. Both fields are non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSpec {
    /// Position in the manifest (0-based).
    pub index: usize,
    pub app_url: String,
    pub app_name: String,
}

/// Manifest records in input order.
pub type AppSpecList = Vec<AppSpec>;

/// Reads and validates the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<AppSpecList, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let specs = parse::parse_manifest(&bytes, path)?;
    tracing::debug!(path = %path.display(), count = specs.len(), "manifest loaded");
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn loads_entries_in_order() {
        let f = manifest(
            r#"[
                {"app_url": "https://example.com", "app_name": "Example"},
                {"app_url": "https://mail.example.org/inbox", "app_name": " Mail "}
            ]"#,
        );
        let specs = load_manifest(f.path()).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].index, 0);
        assert_eq!(specs[0].app_url, "https://example.com");
        assert_eq!(specs[0].app_name, "Example");
        assert_eq!(specs[1].index, 1);
        assert_eq!(specs[1].app_name, "Mail");
    }

    #[test]
    fn empty_list_is_ok() {
        let f = manifest("[]");
        assert!(load_manifest(f.path()).unwrap().is_empty());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let f = manifest(r#"[{"app_url": "https://a.test", "app_name": "A", "icon": "x.png"}]"#);
        assert_eq!(load_manifest(f.path()).unwrap().len(), 1);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_manifest(&dir.path().join("resources.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("resources.json"));
    }

    #[test]
    fn truncated_json() {
        let f = manifest(r#"[{"app_url": "https://example.com", "app_na"#);
        let err = load_manifest(f.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn top_level_object() {
        let f = manifest(r#"{"app_url": "https://example.com", "app_name": "Example"}"#);
        assert!(matches!(
            load_manifest(f.path()).unwrap_err(),
            ConfigError::NotAList { .. }
        ));
    }

    #[test]
    fn entry_not_an_object() {
        let f = manifest(r#"[{"app_url": "https://a.test", "app_name": "A"}, "b"]"#);
        let err = load_manifest(f.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { index: 1, .. }));
    }

    #[test]
    fn missing_field_names_index_and_field() {
        let f = manifest(
            r#"[
                {"app_url": "https://a.test", "app_name": "A"},
                {"app_url": "https://b.test", "app_name": "B"},
                {"app_name": "C"}
            ]"#,
        );
        let err = load_manifest(f.path()).unwrap_err();
        match &err {
            ConfigError::MissingField { index, field, .. } => {
                assert_eq!(*index, 2);
                assert_eq!(*field, "app_url");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("entry 2"), "got: {msg}");
        assert!(msg.contains("app_url"), "got: {msg}");
    }

    #[test]
    fn missing_name() {
        let f = manifest(r#"[{"app_url": "https://a.test"}]"#);
        assert!(matches!(
            load_manifest(f.path()).unwrap_err(),
            ConfigError::MissingField {
                index: 0,
                field: "app_name",
                ..
            }
        ));
    }

    #[test]
    fn non_string_field() {
        let f = manifest(r#"[{"app_url": 42, "app_name": "A"}]"#);
        assert!(matches!(
            load_manifest(f.path()).unwrap_err(),
            ConfigError::NotAString {
                index: 0,
                field: "app_url",
                ..
            }
        ));
        let f = manifest(r#"[{"app_url": "https://a.test", "app_name": null}]"#);
        assert!(matches!(
            load_manifest(f.path()).unwrap_err(),
            ConfigError::NotAString {
                field: "app_name",
                ..
            }
        ));
    }

    #[test]
    fn blank_field() {
        let f = manifest(r#"[{"app_url": "https://a.test", "app_name": "   "}]"#);
        assert!(matches!(
            load_manifest(f.path()).unwrap_err(),
            ConfigError::EmptyField {
                index: 0,
                field: "app_name",
                ..
            }
        ));
    }
}
