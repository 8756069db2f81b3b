//! Error types for the cheat sheet TUI

use thiserror::Error;

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;

/// Main error type for TUI operations
#[derive(Error, Debug)]
pub enum TuiError {
    /// IO errors (terminal writes, log files)
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Terminal setup or teardown errors
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    /// Catalog loading errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] hooksheet_catalog::CatalogError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] hooksheet_config::ConfigError),

    /// Clipboard errors
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Clipboard operation errors
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Clipboard not available
    #[error("Clipboard not available")]
    NotAvailable,

    /// Clipboard operation failed
    #[error("Clipboard operation failed: {message}")]
    OperationFailed { message: String },

    /// Content too large
    #[error("Content too large for clipboard: {size} bytes")]
    ContentTooLarge { size: usize },
}
