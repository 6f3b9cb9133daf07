//! Player credential store.
//!
//! A table keyed by auto-incrementing id with a non-unique lookup by name.
//! `MemoryStore` keeps it in memory; `JsonFileStore` mirrors it to a JSON file
//! after every write.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::entities::Player;
use crate::game::types::PlayerId;

/// One persisted player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(rename = "playerId")]
    pub id: PlayerId,
    pub password: String,
    pub high_score: u32,
    pub username: String,
}

impl PlayerRecord {
    pub fn to_player(&self, remaining_lives: u8) -> Player {
        Player::new(
            self.id,
            self.username.clone(),
            self.password.clone(),
            self.high_score,
            remaining_lives,
        )
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("stored data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("player {0} does not exist")]
    NotFound(PlayerId),
}

pub trait PlayerStore {
    /// First record registered under `name`.
    fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError>;

    /// Register a player with a zero high score and return its new id.
    fn insert(&mut self, username: &str, password: &str) -> Result<PlayerId, StoreError>;

    fn get_by_id(&self, id: PlayerId) -> Result<PlayerRecord, StoreError>;

    fn all(&self) -> Result<Vec<PlayerRecord>, StoreError>;

    /// Raise a player's stored high score; lower values are ignored.
    fn update_high_score(&mut self, id: PlayerId, high_score: u32) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub struct MemoryStore {
    records: BTreeMap<PlayerId, PlayerRecord>,
    next_id: PlayerId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn from_records(records: Vec<PlayerRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            records: records.into_iter().map(|r| (r.id, r)).collect(),
            next_id,
        }
    }
}

impl PlayerStore for MemoryStore {
    fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError> {
        Ok(self.records.values().find(|r| r.username == name).cloned())
    }

    fn insert(&mut self, username: &str, password: &str) -> Result<PlayerId, StoreError> {
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(
            id,
            PlayerRecord {
                id,
                password: password.to_string(),
                high_score: 0,
                username: username.to_string(),
            },
        );
        Ok(id)
    }

    fn get_by_id(&self, id: PlayerId) -> Result<PlayerRecord, StoreError> {
        self.records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        Ok(self.records.values().cloned().collect())
    }

    fn update_high_score(&mut self, id: PlayerId, high_score: u32) -> Result<(), StoreError> {
        let record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        record.high_score = record.high_score.max(high_score);
        Ok(())
    }
}

/// `MemoryStore` persisted as a JSON array of records.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Load `path`, or start empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let inner = match fs::read_to_string(&path) {
            Ok(text) => MemoryStore::from_records(serde_json::from_str(&text)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => MemoryStore::new(),
            Err(err) => return Err(err.into()),
        };
        info!("[Store] Opened {} ({} players)", path.display(), inner.records.len());
        Ok(Self { path, inner })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let records: Vec<&PlayerRecord> = self.inner.records.values().collect();
        fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        debug!("[Store] Wrote {} players to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl PlayerStore for JsonFileStore {
    fn find_by_name(&self, name: &str) -> Result<Option<PlayerRecord>, StoreError> {
        self.inner.find_by_name(name)
    }

    fn insert(&mut self, username: &str, password: &str) -> Result<PlayerId, StoreError> {
        let id = self.inner.insert(username, password)?;
        self.flush()?;
        Ok(id)
    }

    fn get_by_id(&self, id: PlayerId) -> Result<PlayerRecord, StoreError> {
        self.inner.get_by_id(id)
    }

    fn all(&self) -> Result<Vec<PlayerRecord>, StoreError> {
        self.inner.all()
    }

    fn update_high_score(&mut self, id: PlayerId, high_score: u32) -> Result<(), StoreError> {
        self.inner.update_high_score(id, high_score)?;
        self.flush()
    }
}
