//! Error types for courier-store.

use thiserror::Error;

use courier_core::PointId;

/// Errors raised by point stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("point {0} not found")]
    NotFound(PointId),

    #[error("duplicate point id {0}")]
    DuplicateId(PointId),

    #[error("point data parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
