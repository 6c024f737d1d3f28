//! Error types for collection

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data directory does not exist: {}", .0.display())]
    MissingDataRoot(PathBuf),

    #[error("Category has no names file: {}", .0.display())]
    MissingNamesFile(PathBuf),

    #[error("Invalid image name pattern: {0}")]
    Pattern(String),
}

impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;
