//! Error types for the shop backend
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Shop Error Enum ==
/// Unified error type for the catalog and cart layers.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Input rejected before any storage access
    #[error("Validation error: {0}")]
    Validation(String),

    /// Update targeted a product that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Underlying SQLite failure (constraint violation, lock contention, ...)
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Filesystem failure while preparing a database path
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cart contents are not a JSON array of product ids
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the shop backend.
pub type Result<T> = std::result::Result<T, ShopError>;
