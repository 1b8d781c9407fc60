//! Source of "now" for request handlers.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use review_core::{Result, Timestamp};

pub trait Clock: Send + Sync {
    fn now(&self) -> Result<Timestamp>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<Timestamp> {
        Timestamp::from_datetime(Utc::now())
    }
}

/// Manually driven clock.
#[derive(Debug)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            millis: AtomicI64::new(now.as_millis()),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.millis.store(now.as_millis(), Ordering::SeqCst);
    }

    /// Move forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<Timestamp> {
        Timestamp::from_millis(self.millis.load(Ordering::SeqCst))
    }
}
