//! In-memory agent repository for testing.
//!
//! Stores encoded rosters in a shared map, so tests exercise the same
//! serialization path as the file adapters without touching the disk.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::AgentRepository, roster::RosterSnapshot};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use arcade::adapters::InMemoryRepository;
/// use arcade::ports::AgentRepository;
/// use arcade::roster::RosterSnapshot;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// repo.save(&RosterSnapshot::new(), Path::new("roster"))?;
/// assert!(repo.contains(Path::new("roster")));
/// # Ok::<(), arcade::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of rosters currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    /// Store raw bytes under `path`, e.g. to simulate a corrupted snapshot
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(key(path), bytes);
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, roster: &RosterSnapshot, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(roster).map_err(|e| Error::SerializationContext {
            operation: "serialize roster for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<RosterSnapshot> {
        let storage = self.storage();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load roster from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize roster from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
