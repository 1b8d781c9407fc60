//! API request and response types

use serde::{Deserialize, Serialize};

use review_core::ValidationError;
pub use review_core::{CardId, CardStatus, Grade, ReviewState, ReviewStats, Timestamp};

/// Request body for POST /api/study/queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyQueueRequest {
    pub card_ids: Vec<CardId>,
}

/// Response for POST /api/study/queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyQueueResponse {
    pub due: Vec<CardId>,
    pub stats: ReviewStats,
    pub now: Timestamp,
}

/// Grade as sent by clients: a name ("easy") or a button value (1-3).
///
/// Any other JSON value is kept in `Other` so it is reported as an unknown
/// grade rather than a malformed body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeInput {
    Name(String),
    Value(i64),
    Other(serde_json::Value),
}

impl GradeInput {
    pub fn to_grade(&self) -> Result<Grade, ValidationError> {
        match self {
            Self::Name(name) => name.parse(),
            Self::Value(value) => u8::try_from(*value)
                .map_err(|_| ValidationError::UnknownGrade(value.to_string()))
                .and_then(Grade::from_value),
            Self::Other(value) => Err(ValidationError::UnknownGrade(value.to_string())),
        }
    }
}

/// Request body for POST /api/study/review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub card_id: CardId,
    pub grade: GradeInput,
}

/// A card's stored state and where it sits in the review cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardStateResponse {
    pub state: ReviewState,
    pub status: CardStatus,
}
