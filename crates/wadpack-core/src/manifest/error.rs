//! Errors raised while loading the app manifest. All of them are fatal to a run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest {} must be a JSON list of objects with app_url/app_name", .path.display())]
    NotAList { path: PathBuf },

    #[error("manifest {}: entry {index} is not an object", .path.display())]
    NotAnObject { path: PathBuf, index: usize },

    #[error("manifest {}: entry {index} is missing `{field}`", .path.display())]
    MissingField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("manifest {}: entry {index} field `{field}` must be a string", .path.display())]
    NotAString {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },

    #[error("manifest {}: entry {index} field `{field}` is empty", .path.display())]
    EmptyField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },
}
