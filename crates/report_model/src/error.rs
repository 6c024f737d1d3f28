//! Error types for report model operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid style configuration: {0}")]
    InvalidStyle(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
