//! Review scheduling core shared by study front ends and the backend service.
//!
//! Provides:
//! - Graded spaced repetition policy (easy / medium / hard)
//! - Due-card selection
//! - Trailing-day review statistics
//! - A cursor over one study batch
//!
//! Everything here is pure: callers pass state and the current time in and
//! persist what comes back.

pub mod algorithm;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::{get_policy, ReviewPolicy, Schedule};
pub use error::{Result, ValidationError};
pub use scheduler::{compute_next_state, schedule_with, select_due};
pub use session::StudySession;
pub use stats::ReviewStats;
pub use types::{CardId, CardStatus, Grade, ReviewState, Timestamp, MS_PER_DAY};
