//! Error types for catalog construction and loading

use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error types for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate topic id: {0}")]
    DuplicateId(String),

    #[error("Topic at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Topic not found: {0}")]
    EntryNotFound(String),

    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to parse catalog {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
