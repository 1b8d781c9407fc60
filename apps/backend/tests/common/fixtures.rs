//! Test fixtures and factory functions for creating test data.

use serde_json::json;

use review_core::{CardId, Grade, ReviewState, Timestamp, MS_PER_DAY};

/// A review state graded at `last_reviewed_at` with the given interval.
pub fn review_state(
    card_id: &str,
    last_reviewed_at: i64,
    interval_days: u32,
    repetitions: u32,
) -> ReviewState {
    let last_reviewed_at = Timestamp::from_millis(last_reviewed_at).unwrap();
    ReviewState {
        card_id: CardId::from(card_id),
        last_reviewed_at,
        last_grade: if repetitions == 0 {
            Grade::Hard
        } else {
            Grade::Easy
        },
        next_review_at: last_reviewed_at.add_days(interval_days).unwrap(),
        interval_days,
        repetitions,
    }
}

/// A one-day state whose next review falls exactly at `next_review_at`.
pub fn due_at(card_id: &str, next_review_at: i64) -> ReviewState {
    review_state(card_id, next_review_at - MS_PER_DAY, 1, 1)
}

/// Create a study queue request body.
pub fn queue_request(card_ids: &[&str]) -> serde_json::Value {
    json!({ "card_ids": card_ids })
}

/// Create a review request body.
pub fn review_request(card_id: &str, grade: impl Into<serde_json::Value>) -> serde_json::Value {
    json!({ "card_id": card_id, "grade": grade.into() })
}
