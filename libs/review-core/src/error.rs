//! Error types for review-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Inputs rejected by the scheduler.
///
/// Every variant is fatal to the call that produced it; no grading event is
/// partially applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown grade: {0:?} (expected easy, medium or hard)")]
    UnknownGrade(String),

    #[error("negative timestamp: {0}")]
    NegativeTimestamp(i64),

    #[error("timestamp out of range")]
    TimestampOverflow,

    #[error("review at {now} precedes last review at {last_reviewed_at}")]
    NonMonotonicTime { last_reviewed_at: i64, now: i64 },

    #[error("state for card {found} passed when grading card {expected}")]
    CardMismatch { expected: String, found: String },

    #[error("invalid state for card {card_id}: {reason}")]
    InvalidState { card_id: String, reason: String },
}
