//! Construction-time errors.
//!
//! The pipeline itself never fails; out-of-range input is normalized. Only a
//! table whose configuration contradicts its column schema is rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    #[error("search key '{0}' is not a column of this table")]
    UnknownSearchKey(String),

    #[error("filter key '{0}' is not a column of this table")]
    UnknownFilterKey(String),

    #[error("column key '{0}' is defined more than once")]
    DuplicateColumn(String),

    #[error("invalid table configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
