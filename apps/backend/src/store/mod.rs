//! Persistence for per-card review state.
//!
//! The scheduler never touches storage; the session controller loads state
//! from a [`ReviewStore`], hands it to `review_core`, and writes the result
//! back through [`ReviewStore::update`].

mod error;
mod json_file;
mod memory;

use std::collections::HashMap;

use review_core::{CardId, ReviewState, ValidationError};

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Read-modify-write step applied to one card's state.
pub type UpdateFn<'a> =
    dyn FnOnce(Option<&ReviewState>) -> std::result::Result<ReviewState, ValidationError> + 'a;

/// Durable key-value storage of review state, keyed by card id.
pub trait ReviewStore: Send + Sync {
    /// Store identifier for logs.
    fn name(&self) -> &'static str;

    fn get(&self, card_id: &CardId) -> Result<Option<ReviewState>>;

    /// Copy of every stored state.
    fn snapshot(&self) -> Result<HashMap<CardId, ReviewState>>;

    /// Atomically replace one card's state with the output of `update`.
    ///
    /// `update` runs while the store is locked, so concurrent updates of the
    /// same card are serialized. When it returns an error nothing is written.
    fn update(&self, card_id: &CardId, update: Box<UpdateFn<'_>>) -> Result<ReviewState>;

    fn remove(&self, card_id: &CardId) -> Result<Option<ReviewState>>;
}
