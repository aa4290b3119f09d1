//! Entry-by-entry validation of the manifest JSON.

use serde_json::{Map, Value};
use std::path::Path;

use super::error::ConfigError;
use super::AppSpec;

pub(super) const APP_URL: &str = "app_url";
pub(super) const APP_NAME: &str = "app_name";

pub(super) fn parse_manifest(data: &[u8], path: &Path) -> Result<Vec<AppSpec>, ConfigError> {
    let value: Value = serde_json::from_slice(data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(ConfigError::NotAList {
            path: path.to_path_buf(),
        });
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_entry(index, item, path))
        .collect()
}

fn parse_entry(index: usize, item: &Value, path: &Path) -> Result<AppSpec, ConfigError> {
    let obj = item.as_object().ok_or_else(|| ConfigError::NotAnObject {
        path: path.to_path_buf(),
        index,
    })?;

    let app_url = required_string(obj, index, APP_URL, path)?;
    let app_name = required_string(obj, index, APP_NAME, path)?;

    for key in obj.keys().filter(|k| *k != APP_URL && *k != APP_NAME) {
        tracing::debug!(index, key = %key, "ignoring unknown manifest key");
    }

    Ok(AppSpec {
        index,
        app_url,
        app_name,
    })
}

fn required_string(
    obj: &Map<String, Value>,
    index: usize,
    field: &'static str,
    path: &Path,
) -> Result<String, ConfigError> {
    match obj.get(field) {
        None => Err(ConfigError::MissingField {
            path: path.to_path_buf(),
            index,
            field,
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ConfigError::EmptyField {
            path: path.to_path_buf(),
            index,
            field,
        }),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(_) => Err(ConfigError::NotAString {
            path: path.to_path_buf(),
            index,
            field,
        }),
    }
}
