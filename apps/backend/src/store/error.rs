//! Review-state store error types.

use review_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid stored state: {0}")]
    Validation(#[from] ValidationError),

    #[error("update rejected: {0}")]
    Rejected(ValidationError),

    #[error("duplicate stored state for card {0}")]
    DuplicateCard(String),

    #[error("store lock poisoned")]
    Poisoned,
}
