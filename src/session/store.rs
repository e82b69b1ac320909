//! Key/value backends for the persisted session.
//!
//! The session lives in a flat string map (`token`, `userRole`, `doctorId`,
//! `patientId`). `MemoryStore` keeps it in process; `FileStore` writes it
//! through to a JSON file so a restarted client resumes the same login.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Internal lock error")]
    LockPoisoned,
}

/// String-valued persistent storage scoped to one client.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    /// Remove every key. Mirrors a user wiping site data.
    fn clear(&self) -> Result<(), StoreError>;
}

// ═══════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .clear();
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════

/// JSON-file backed store. Every mutation rewrites the file atomically
/// (temp file + rename) while the in-memory map lock is held, and the map
/// only changes once the file has.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is an empty session. A corrupt file is logged and
    /// also treated as empty; it is overwritten on the next mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable session file");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `apply` to a copy, persist the copy, then install it. A failed
    /// write leaves both the file and the map as they were.
    fn mutate(&self, apply: impl FnOnce(&mut HashMap<String, String>)) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = entries.clone();
        apply(&mut next);
        persist(&self.path, &next)?;
        *entries = next;
        Ok(())
    }
}

fn persist(path: &Path, entries: &HashMap<String, String>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.mutate(|map| {
            map.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.mutate(HashMap::clear)
    }
}
