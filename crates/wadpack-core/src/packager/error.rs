//! Per-record packaging failures. None of them stops the rest of a batch.

use std::path::{Path, PathBuf};

use crate::runtime::RuntimeError;

#[derive(Debug, thiserror::Error)]
pub enum PackagingError {
    #[error("invalid app_url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("app_name `{name}` has no characters usable in a file name")]
    EmptyName { name: String },

    #[error("`{name}` maps to `{slug}`, already used by entry {first_index}")]
    DuplicateName {
        name: String,
        slug: String,
        first_index: usize,
    },

    #[error("output directory {} is not usable: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode app config: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("the url handler needs an application menu directory")]
    NoMenuDir,
}

pub(super) fn write_err(path: &Path) -> impl FnOnce(std::io::Error) -> PackagingError {
    let path = path.to_path_buf();
    move |source| PackagingError::Write { path, source }
}
