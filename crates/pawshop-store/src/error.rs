//! Store error types.

use thiserror::Error;

/// Errors surfaced by the document store.
///
/// Load-side problems (missing or corrupt slots) are not errors: they
/// fall back to the slot's default value. Only save-side failures, where
/// data would otherwise be lost silently, surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
