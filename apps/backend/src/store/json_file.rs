//! Review-state store backed by a single JSON file.
//!
//! The file holds a JSON array of review states sorted by card id. It is read
//! once on open and rewritten in full after every mutation, via a temporary
//! sibling file and a rename so readers never see a partial write.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use review_core::{CardId, ReviewState};

use super::{Result, ReviewStore, StoreError, UpdateFn};

pub struct JsonFileStore {
    path: PathBuf,
    states: Mutex<HashMap<CardId, ReviewState>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading and validating existing state.
    ///
    /// A missing or empty file is an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let states = if path.exists() {
            load(&path)?
        } else {
            HashMap::new()
        };

        tracing::info!(
            path = %path.display(),
            cards = states.len(),
            "Opened review state file"
        );

        Ok(Self {
            path,
            states: Mutex::new(states),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CardId, ReviewState>>> {
        self.states.lock().map_err(|_| StoreError::Poisoned)
    }

    fn persist(&self, states: &HashMap<CardId, ReviewState>) -> Result<()> {
        let mut list: Vec<&ReviewState> = states.values().collect();
        list.sort_by(|a, b| a.card_id.cmp(&b.card_id));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, serde_json::to_vec_pretty(&list)?)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

fn load(path: &Path) -> Result<HashMap<CardId, ReviewState>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let list: Vec<ReviewState> = serde_json::from_str(&content)?;
    let mut states = HashMap::with_capacity(list.len());
    for state in list {
        state.validate()?;
        let card_id = state.card_id.clone();
        if states.insert(card_id.clone(), state).is_some() {
            return Err(StoreError::DuplicateCard(card_id.to_string()));
        }
    }
    Ok(states)
}

impl ReviewStore for JsonFileStore {
    fn name(&self) -> &'static str {
        "json_file"
    }

    fn get(&self, card_id: &CardId) -> Result<Option<ReviewState>> {
        Ok(self.lock()?.get(card_id).cloned())
    }

    fn snapshot(&self) -> Result<HashMap<CardId, ReviewState>> {
        Ok(self.lock()?.clone())
    }

    fn update(&self, card_id: &CardId, update: Box<UpdateFn<'_>>) -> Result<ReviewState> {
        let mut states = self.lock()?;
        let next = update(states.get(card_id)).map_err(StoreError::Rejected)?;

        let previous = states.insert(card_id.clone(), next.clone());
        if let Err(e) = self.persist(&states) {
            tracing::error!(card_id = %card_id, error = %e, "Failed to persist review state");
            match previous {
                Some(previous) => states.insert(card_id.clone(), previous),
                None => states.remove(card_id),
            };
            return Err(e);
        }
        Ok(next)
    }

    fn remove(&self, card_id: &CardId) -> Result<Option<ReviewState>> {
        let mut states = self.lock()?;
        let Some(removed) = states.remove(card_id) else {
            return Ok(None);
        };

        if let Err(e) = self.persist(&states) {
            tracing::error!(card_id = %card_id, error = %e, "Failed to persist review state");
            states.insert(card_id.clone(), removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}
