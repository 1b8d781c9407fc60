//! Spaced repetition policy implementations.

pub mod graded;

use crate::types::{Grade, ReviewState};

/// Interval and repetition count produced by a policy for one grading event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub interval_days: u32,
    pub repetitions: u32,
}

/// Trait for spaced repetition policies.
pub trait ReviewPolicy: Send + Sync {
    /// Policy identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next interval and repetition count.
    ///
    /// `prior` is `None` for a card that has never been graded.
    fn next_schedule(&self, prior: Option<&ReviewState>, grade: Grade) -> Schedule;
}

/// Get policy by name.
pub fn get_policy(name: &str) -> Option<Box<dyn ReviewPolicy>> {
    match name {
        "graded" => Some(Box::new(graded::GradedPolicy::default())),
        _ => None,
    }
}
