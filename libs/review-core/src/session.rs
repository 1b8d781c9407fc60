//! Cursor over one study batch.

use std::collections::HashMap;

use crate::scheduler::select_due;
use crate::types::{CardId, ReviewState, Timestamp};

/// A batch of due cards frozen at session start, walked one card at a time.
///
/// Grading does not change the batch; cards graded during the session are
/// not re-queued until a new session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    queue: Vec<CardId>,
    position: usize,
}

impl StudySession {
    pub fn start<'a, I>(
        all_card_ids: I,
        states: &HashMap<CardId, ReviewState>,
        now: Timestamp,
    ) -> Self
    where
        I: IntoIterator<Item = &'a CardId>,
    {
        Self {
            queue: select_due(all_card_ids, states, now),
            position: 0,
        }
    }

    /// Card currently presented, or `None` once the batch is exhausted.
    pub fn current(&self) -> Option<&CardId> {
        self.queue.get(self.position)
    }

    /// Move past the current card. Returns `true` when the session is complete.
    pub fn advance(&mut self) -> bool {
        if self.position < self.queue.len() {
            self.position += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Zero-based index of the current card.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cards not yet presented, including the current one.
    pub fn remaining(&self) -> &[CardId] {
        &self.queue[self.position.min(self.queue.len())..]
    }

    /// Go back to the first card of the same batch.
    pub fn restart(&mut self) {
        self.position = 0;
    }
}
