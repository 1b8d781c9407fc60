//! Trailing-day review statistics.

use serde::{Deserialize, Serialize};

use crate::types::{Grade, ReviewState, Timestamp, MS_PER_DAY};

/// Grading activity over the last 24 hours plus the size of the due batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub remaining: usize,
}

impl ReviewStats {
    /// Count states last graded strictly within the 24 hours before `now`.
    ///
    /// Only each card's most recent grade is known, so a card graded twice
    /// in the window counts once, under its latest grade.
    pub fn compute<'a, I>(states: I, remaining: usize, now: Timestamp) -> Self
    where
        I: IntoIterator<Item = &'a ReviewState>,
    {
        let window_start = now.as_millis().saturating_sub(MS_PER_DAY);
        let mut stats = Self {
            remaining,
            ..Self::default()
        };

        for state in states
            .into_iter()
            .filter(|s| s.last_reviewed_at.as_millis() > window_start)
        {
            stats.total += 1;
            match state.last_grade {
                Grade::Easy => stats.easy += 1,
                Grade::Medium => stats.medium += 1,
                Grade::Hard => stats.hard += 1,
            }
        }
        stats
    }
}
