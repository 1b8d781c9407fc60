//! Grading and due-card selection.
//!
//! Both operations are pure: state comes in by value or reference, the new
//! state goes out, and `now` is always supplied by the caller.

use std::collections::{HashMap, HashSet};

use crate::algorithm::graded::GradedPolicy;
use crate::algorithm::ReviewPolicy;
use crate::error::{Result, ValidationError};
use crate::types::{CardId, Grade, ReviewState, Timestamp};

/// Compute a card's state after grading it with the default policy.
pub fn compute_next_state(
    card_id: &CardId,
    prior: Option<&ReviewState>,
    grade: Grade,
    now: Timestamp,
) -> Result<ReviewState> {
    schedule_with(&GradedPolicy::default(), card_id, prior, grade, now)
}

/// Compute a card's state after grading it with `policy`.
pub fn schedule_with(
    policy: &dyn ReviewPolicy,
    card_id: &CardId,
    prior: Option<&ReviewState>,
    grade: Grade,
    now: Timestamp,
) -> Result<ReviewState> {
    if let Some(prior) = prior {
        if &prior.card_id != card_id {
            return Err(ValidationError::CardMismatch {
                expected: card_id.to_string(),
                found: prior.card_id.to_string(),
            });
        }
        if now < prior.last_reviewed_at {
            return Err(ValidationError::NonMonotonicTime {
                last_reviewed_at: prior.last_reviewed_at.as_millis(),
                now: now.as_millis(),
            });
        }
    }

    let schedule = policy.next_schedule(prior, grade);
    let interval_days = schedule.interval_days.max(1);

    Ok(ReviewState {
        card_id: card_id.clone(),
        last_reviewed_at: now,
        last_grade: grade,
        next_review_at: now.add_days(interval_days)?,
        interval_days,
        repetitions: schedule.repetitions,
    })
}

/// Cards due at `now`, in the order of `all_card_ids`.
///
/// A card is due when it has no state or its next review has been reached.
/// Repeated ids are reported once, at their first position.
pub fn select_due<'a, I>(
    all_card_ids: I,
    states: &HashMap<CardId, ReviewState>,
    now: Timestamp,
) -> Vec<CardId>
where
    I: IntoIterator<Item = &'a CardId>,
{
    let mut seen = HashSet::new();
    all_card_ids
        .into_iter()
        .filter(|id| seen.insert(*id))
        .filter(|id| states.get(*id).map_or(true, |state| state.is_due(now)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MS_PER_DAY;
    use pretty_assertions::assert_eq;

    const T: i64 = 1_700_000_000_000;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    fn id(s: &str) -> CardId {
        CardId::from(s)
    }

    fn prior(card: &str, interval_days: u32, repetitions: u32) -> ReviewState {
        let last_reviewed_at = ts(T - i64::from(interval_days) * MS_PER_DAY);
        ReviewState {
            card_id: id(card),
            last_reviewed_at,
            last_grade: if repetitions == 0 { Grade::Hard } else { Grade::Easy },
            next_review_at: last_reviewed_at.add_days(interval_days).unwrap(),
            interval_days,
            repetitions,
        }
    }

    fn due_at(card: &str, next_review_at: i64) -> ReviewState {
        ReviewState {
            card_id: id(card),
            last_reviewed_at: ts(next_review_at - MS_PER_DAY),
            last_grade: Grade::Medium,
            next_review_at: ts(next_review_at),
            interval_days: 1,
            repetitions: 1,
        }
    }

    #[test]
    fn scenario_easy_after_one_repetition() {
        let state = prior("a", 6, 1);
        let next = compute_next_state(&id("a"), Some(&state), Grade::Easy, ts(T)).unwrap();
        assert_eq!(
            next,
            ReviewState {
                card_id: id("a"),
                last_reviewed_at: ts(T),
                last_grade: Grade::Easy,
                next_review_at: ts(T + 15 * MS_PER_DAY),
                interval_days: 15,
                repetitions: 2,
            }
        );
    }

    #[test]
    fn scenario_hard_resets() {
        let state = prior("a", 15, 2);
        let next = compute_next_state(&id("a"), Some(&state), Grade::Hard, ts(T)).unwrap();
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 0);
        assert_eq!(next.next_review_at, ts(T + MS_PER_DAY));
        assert_eq!(next.last_grade, Grade::Hard);
    }

    #[test]
    fn scenario_new_card_medium() {
        let next = compute_next_state(&id("c"), None, Grade::Medium, ts(T)).unwrap();
        assert_eq!(next.interval_days, 1);
        assert_eq!(next.repetitions, 1);
        assert_eq!(next.next_review_at, ts(T + MS_PER_DAY));
        assert_eq!(next.last_reviewed_at, ts(T));
    }

    #[test]
    fn new_card_easy_defaults() {
        let next = compute_next_state(&id("c"), None, Grade::Easy, ts(T)).unwrap();
        assert_eq!((next.interval_days, next.repetitions), (1, 1));
    }

    #[test]
    fn easy_growth_is_monotonic() {
        for interval in 1..200 {
            for reps in 2..5 {
                let state = prior("a", interval, reps);
                let next =
                    compute_next_state(&id("a"), Some(&state), Grade::Easy, ts(T)).unwrap();
                let expected = (f64::from(interval) * 2.5).round() as u32;
                assert_eq!(next.interval_days, expected);
                assert!(next.interval_days >= interval);
            }
        }
    }

    #[test]
    fn hard_always_resets() {
        for interval in [1, 2, 6, 15, 90, 365] {
            for reps in 0..6 {
                let state = prior("a", interval, reps);
                let next =
                    compute_next_state(&id("a"), Some(&state), Grade::Hard, ts(T)).unwrap();
                assert_eq!((next.interval_days, next.repetitions), (1, 0));
            }
        }
    }

    #[test]
    fn results_satisfy_state_invariants() {
        let mut state: Option<ReviewState> = None;
        let mut now = T;
        for grade in [
            Grade::Easy,
            Grade::Easy,
            Grade::Medium,
            Grade::Hard,
            Grade::Medium,
            Grade::Easy,
            Grade::Easy,
        ] {
            let next = compute_next_state(&id("a"), state.as_ref(), grade, ts(now)).unwrap();
            next.validate().unwrap();
            now = next.next_review_at.as_millis();
            state = Some(next);
        }
    }

    #[test]
    fn grading_is_deterministic_and_leaves_prior_untouched() {
        let state = prior("a", 6, 2);
        let snapshot = state.clone();
        let first = compute_next_state(&id("a"), Some(&state), Grade::Medium, ts(T)).unwrap();
        let second = compute_next_state(&id("a"), Some(&state), Grade::Medium, ts(T)).unwrap();
        assert_eq!(first, second);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn mismatched_card_rejected() {
        let state = prior("a", 6, 2);
        let err = compute_next_state(&id("b"), Some(&state), Grade::Easy, ts(T)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::CardMismatch {
                expected: "b".to_string(),
                found: "a".to_string(),
            }
        );
    }

    #[test]
    fn grading_before_last_review_rejected() {
        let state = prior("a", 6, 2);
        let before = state.last_reviewed_at.as_millis() - 1;
        let err = compute_next_state(&id("a"), Some(&state), Grade::Easy, ts(before)).unwrap_err();
        assert!(matches!(err, ValidationError::NonMonotonicTime { .. }));
    }

    #[test]
    fn regrading_at_same_instant_allowed() {
        let first = compute_next_state(&id("a"), None, Grade::Easy, ts(T)).unwrap();
        let second = compute_next_state(&id("a"), Some(&first), Grade::Easy, ts(T)).unwrap();
        assert_eq!(second.interval_days, 6);
    }

    #[test]
    fn next_review_overflow_rejected() {
        let err = compute_next_state(&id("a"), None, Grade::Easy, ts(i64::MAX - 1)).unwrap_err();
        assert_eq!(err, ValidationError::TimestampOverflow);
    }

    #[test]
    fn scenario_select_due_keeps_input_order() {
        let all = vec![id("A"), id("B"), id("C")];
        let states = HashMap::from([
            (id("A"), due_at("A", T - 1)),
            (id("B"), due_at("B", T + 1)),
        ]);
        assert_eq!(select_due(&all, &states, ts(T)), vec![id("A"), id("C")]);
    }

    #[test]
    fn select_due_includes_exact_boundary() {
        let all = vec![id("A")];
        let states = HashMap::from([(id("A"), due_at("A", T))]);
        assert_eq!(select_due(&all, &states, ts(T)), vec![id("A")]);
        assert!(select_due(&all, &states, ts(T - 1)).is_empty());
    }

    #[test]
    fn select_due_matches_membership_rule() {
        let all: Vec<CardId> = (0..20).map(|i| id(&format!("card-{i}"))).collect();
        let states: HashMap<CardId, ReviewState> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 != 0)
            .map(|(i, card)| {
                let next = T + (i as i64 - 10) * MS_PER_DAY;
                (card.clone(), due_at(card.as_str(), next))
            })
            .collect();

        for offset in -12..12 {
            let now = ts(T + offset * MS_PER_DAY);
            let due = select_due(&all, &states, now);
            for card in &all {
                let expected = states.get(card).map_or(true, |s| s.next_review_at <= now);
                assert_eq!(due.contains(card), expected, "card {card} at offset {offset}");
            }
        }
    }

    #[test]
    fn select_due_is_idempotent() {
        let all = vec![id("A"), id("B"), id("C"), id("D")];
        let states = HashMap::from([
            (id("B"), due_at("B", T - MS_PER_DAY)),
            (id("D"), due_at("D", T + MS_PER_DAY)),
        ]);
        let first = select_due(&all, &states, ts(T));
        let second = select_due(&all, &states, ts(T));
        assert_eq!(first, second);
        assert_eq!(first, vec![id("A"), id("B"), id("C")]);
    }

    #[test]
    fn select_due_reports_duplicates_once() {
        let all = vec![id("A"), id("B"), id("A")];
        let states = HashMap::new();
        assert_eq!(select_due(&all, &states, ts(T)), vec![id("A"), id("B")]);
    }

    #[test]
    fn select_due_ignores_states_for_unknown_cards() {
        let all = vec![id("A")];
        let states = HashMap::from([(id("Z"), due_at("Z", T - 1))]);
        assert_eq!(select_due(&all, &states, ts(T)), vec![id("A")]);
    }
}
