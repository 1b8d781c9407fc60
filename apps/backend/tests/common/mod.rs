//! Common test utilities for integration tests.
//!
//! Every test gets its own in-memory store and a fixed clock, so no external
//! services are needed.

pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use review_core::{ReviewState, Timestamp};

use review_backend::clock::FixedClock;
use review_backend::store::{MemoryStore, ReviewStore};
use review_backend::{router, AppState};

/// Start of every test's timeline.
pub const T0: i64 = 1_700_000_000_000;

/// Test context holding the store and clock behind a test server.
pub struct TestContext {
    pub store: Arc<dyn ReviewStore>,
    pub clock: Arc<FixedClock>,
    pub server: TestServer,
}

impl TestContext {
    /// Create a context with an empty in-memory store at `T0`.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a context pre-filled with `states`.
    pub fn with_states(states: impl IntoIterator<Item = ReviewState>) -> Self {
        Self::with_store(Arc::new(MemoryStore::with_states(states)))
    }

    /// Create a context over an arbitrary store.
    pub fn with_store(store: Arc<dyn ReviewStore>) -> Self {
        let clock = Arc::new(FixedClock::new(Timestamp::from_millis(T0).unwrap()));
        let policy = review_core::get_policy("graded").unwrap();
        let state = AppState::new(store.clone(), clock.clone(), Arc::from(policy));
        let server = TestServer::new(router(state)).unwrap();

        Self {
            store,
            clock,
            server,
        }
    }

    /// Move the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        self.clock.advance(days * review_core::MS_PER_DAY);
    }
}
