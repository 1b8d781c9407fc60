//! Three-grade spaced repetition policy.
//!
//! A simplified SM-2: there is no per-card ease factor, only fixed growth
//! multipliers per grade.
//! - Easy: 1 day, then 6 days, then the previous interval times 2.5
//! - Medium: 1 day, then the previous interval times 1.3
//! - Hard: back to 1 day, repetitions reset

use super::{ReviewPolicy, Schedule};
use crate::types::{Grade, ReviewState};

/// Graded policy with configurable parameters.
#[derive(Debug, Clone)]
pub struct GradedPolicy {
    pub first_interval: u32,
    pub second_easy_interval: u32,
    pub easy_multiplier: f64,
    pub medium_multiplier: f64,
    pub minimum_interval: u32,
}

impl Default for GradedPolicy {
    fn default() -> Self {
        Self {
            first_interval: 1,
            second_easy_interval: 6,
            easy_multiplier: 2.5,
            medium_multiplier: 1.3,
            minimum_interval: 1,
        }
    }
}

impl ReviewPolicy for GradedPolicy {
    fn name(&self) -> &'static str {
        "graded"
    }

    fn next_schedule(&self, prior: Option<&ReviewState>, grade: Grade) -> Schedule {
        let interval = prior.map_or(0, |s| s.interval_days);
        let repetitions = prior.map_or(0, |s| s.repetitions);

        let (new_interval, new_repetitions) = match grade {
            Grade::Easy => {
                let next = match repetitions {
                    0 => self.first_interval,
                    1 => self.second_easy_interval,
                    _ => grow(interval, self.easy_multiplier),
                };
                (next, repetitions.saturating_add(1))
            }
            Grade::Medium => {
                let next = match repetitions {
                    0 => self.first_interval,
                    _ => grow(interval, self.medium_multiplier),
                };
                (next, repetitions.saturating_add(1))
            }
            Grade::Hard => (self.first_interval, 0),
        };

        Schedule {
            // Rounding may reach 0 for a corrupt prior interval.
            interval_days: new_interval.max(self.minimum_interval).max(1),
            repetitions: new_repetitions,
        }
    }
}

/// Multiply and round half away from zero; saturates at `u32::MAX`.
fn grow(interval: u32, multiplier: f64) -> u32 {
    (f64::from(interval) * multiplier).round() as u32
}
