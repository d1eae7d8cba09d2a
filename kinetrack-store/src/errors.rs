//! Error types for the aggregation store and tracker

use thiserror::Error;

/// Persistence and configuration errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem backend failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode or decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by a custom backend
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Invalid store, tracker or pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
