//! Error types for storage operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Report model error: {0}")]
    Model(#[from] report_model::ModelError),

    #[error("DOCX error: {0}")]
    Docx(#[from] crate::docx::DocxError),

    #[error("Destination directory does not exist: {}", .0.display())]
    MissingDestinationDirectory(PathBuf),

    #[error("Destination is not a file path: {}", .0.display())]
    InvalidDestination(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
