//! In-process review-state store.

use std::collections::HashMap;
use std::sync::RwLock;

use review_core::{CardId, ReviewState};

use super::{Result, ReviewStore, StoreError, UpdateFn};

/// Review state held in memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: RwLock<HashMap<CardId, ReviewState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `states`.
    pub fn with_states(states: impl IntoIterator<Item = ReviewState>) -> Self {
        let states = states
            .into_iter()
            .map(|state| (state.card_id.clone(), state))
            .collect();
        Self {
            states: RwLock::new(states),
        }
    }
}

impl ReviewStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, card_id: &CardId) -> Result<Option<ReviewState>> {
        let states = self.states.read().map_err(|_| StoreError::Poisoned)?;
        Ok(states.get(card_id).cloned())
    }

    fn snapshot(&self) -> Result<HashMap<CardId, ReviewState>> {
        let states = self.states.read().map_err(|_| StoreError::Poisoned)?;
        Ok(states.clone())
    }

    fn update(&self, card_id: &CardId, update: Box<UpdateFn<'_>>) -> Result<ReviewState> {
        let mut states = self.states.write().map_err(|_| StoreError::Poisoned)?;
        let next = update(states.get(card_id)).map_err(StoreError::Rejected)?;
        states.insert(card_id.clone(), next.clone());
        Ok(next)
    }

    fn remove(&self, card_id: &CardId) -> Result<Option<ReviewState>> {
        let mut states = self.states.write().map_err(|_| StoreError::Poisoned)?;
        Ok(states.remove(card_id))
    }
}
