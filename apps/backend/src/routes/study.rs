//! Study endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use review_core::{schedule_with, select_due, ValidationError};

fn now(state: &AppState) -> Result<Timestamp> {
    state.clock.now().map_err(clock_unavailable)
}

fn clock_unavailable(error: ValidationError) -> ApiError {
    ApiError::Internal(format!("clock unavailable: {error}"))
}

fn parse_card_id(raw: &str) -> Result<CardId> {
    if raw.trim().is_empty() {
        return Err(ApiError::BadRequest("card_id must not be empty".to_string()));
    }
    Ok(CardId::from(raw))
}

/// Run store work on the blocking pool; the file store writes to disk.
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
}

/// Grade one card under the store lock.
///
/// The clock is read inside the update, so the grading time is never older
/// than the state it is applied to.
fn grade_card(state: &AppState, card_id: &CardId, grade: Grade) -> Result<ReviewState> {
    let policy = &*state.policy;
    let clock = &*state.clock;
    let mut clock_error = None;

    let graded = state.store.update(
        card_id,
        Box::new(|prior: Option<&ReviewState>| {
            let now = clock.now().inspect_err(|e| clock_error = Some(e.clone()))?;
            schedule_with(policy, card_id, prior, grade, now)
        }),
    );

    match clock_error {
        Some(error) => Err(clock_unavailable(error)),
        None => Ok(graded?),
    }
}

/// POST /api/study/queue
/// Returns the cards due now, in the order they were supplied
pub async fn queue(
    State(state): State<AppState>,
    Json(payload): Json<StudyQueueRequest>,
) -> Result<Json<StudyQueueResponse>> {
    let card_ids = payload
        .card_ids
        .iter()
        .map(|id| parse_card_id(id.as_str()))
        .collect::<Result<Vec<_>>>()?;
    let requested = card_ids.len();

    let response = blocking(move || {
        let now = now(&state)?;
        let states = state.store.snapshot()?;

        let due = select_due(&card_ids, &states, now);
        let stats = ReviewStats::compute(states.values(), due.len(), now);
        Ok(StudyQueueResponse { due, stats, now })
    })
    .await?;

    tracing::debug!(
        cards = requested,
        due = response.due.len(),
        "Built study queue"
    );

    Ok(Json(response))
}

/// POST /api/study/review
/// Grades a card and stores its next review
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<CardStateResponse>> {
    let card_id = parse_card_id(payload.card_id.as_str())?;
    let grade = payload.grade.to_grade()?;

    let next = blocking({
        let card_id = card_id.clone();
        move || grade_card(&state, &card_id, grade)
    })
    .await?;

    tracing::info!(
        card_id = %card_id,
        grade = %grade,
        interval_days = next.interval_days,
        repetitions = next.repetitions,
        "Graded card"
    );

    let status = CardStatus::of(Some(&next), next.last_reviewed_at);
    Ok(Json(CardStateResponse {
        state: next,
        status,
    }))
}

/// GET /api/study/state/{card_id}
pub async fn get_state(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<CardStateResponse>> {
    let card_id = parse_card_id(&card_id)?;

    let response = blocking(move || {
        let now = now(&state)?;
        let stored = state
            .store
            .get(&card_id)?
            .ok_or_else(|| ApiError::NotFound(format!("No review state for card {card_id}")))?;

        let status = CardStatus::of(Some(&stored), now);
        Ok(CardStateResponse {
            state: stored,
            status,
        })
    })
    .await?;

    Ok(Json(response))
}

/// DELETE /api/study/state/{card_id}
/// Forgets a card's review history, e.g. after the card itself is deleted
pub async fn delete_state(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<StatusCode> {
    let card_id = parse_card_id(&card_id)?;

    let removed = blocking({
        let card_id = card_id.clone();
        move || Ok(state.store.remove(&card_id)?)
    })
    .await?;

    match removed {
        Some(_) => {
            tracing::info!(card_id = %card_id, "Removed review state");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::NotFound(format!(
            "No review state for card {card_id}"
        ))),
    }
}
