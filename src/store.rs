//! Progress persistence: the store seam and the two bundled adapters, one
//! in process memory and one on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use tracing::debug;

use crate::error::StoreError;
use crate::navigator::NavigatorState;

/// A persistence adapter for navigator snapshots, keyed by session.
///
/// Stores are monotonic: a save whose step counter is behind the snapshot
/// already held under the key is skipped, so a delayed write cannot roll a
/// session backwards.
pub trait ProgressStore {
    /// Loads the snapshot stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<NavigatorState>, StoreError>;

    /// Persists `state` under `key`, unless an existing snapshot is ahead.
    fn save(&mut self, key: &str, state: &NavigatorState) -> Result<(), StoreError>;

    /// Removes the snapshot stored under `key`; absent keys are fine.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Keeps snapshots in process memory; everything is gone when the process
/// exits.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    snapshots: AHashMap<String, NavigatorState>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self, key: &str) -> Result<Option<NavigatorState>, StoreError> {
        Ok(self.snapshots.get(key).cloned())
    }

    fn save(&mut self, key: &str, state: &NavigatorState) -> Result<(), StoreError> {
        if let Some(existing) = self.snapshots.get(key) {
            if existing.step > state.step {
                debug!(
                    key,
                    held = existing.step,
                    offered = state.step,
                    "skipping out-of-date snapshot"
                );
                return Ok(());
            }
        }
        self.snapshots.insert(key.to_string(), state.clone());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.snapshots.remove(key);
        Ok(())
    }
}

/// Keeps one pretty-printed JSON snapshot per session key under a root
/// directory.
#[derive(Debug)]
pub struct FileProgressStore {
    root: PathBuf,
}

impl FileProgressStore {
    /// Opens a store rooted at `root`, creating the directory when missing.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The file a session key maps to. Keys are flattened to a safe file
    /// stem, so arbitrary session identifiers cannot escape the root.
    fn snapshot_path(&self, key: &str) -> PathBuf {
        let stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{stem}.json"))
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self, key: &str) -> Result<Option<NavigatorState>, StoreError> {
        let path = self.snapshot_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let state = serde_json::from_str(&raw)
            .map_err(|error| StoreError::Corrupt(error.to_string()))?;
        Ok(Some(state))
    }

    fn save(&mut self, key: &str, state: &NavigatorState) -> Result<(), StoreError> {
        // A corrupt or missing existing snapshot never blocks a save; only
        // a readable, newer one does.
        if let Ok(Some(existing)) = self.load(key) {
            if existing.step > state.step {
                debug!(
                    key,
                    held = existing.step,
                    offered = state.step,
                    "skipping out-of-date snapshot"
                );
                return Ok(());
            }
        }
        let raw = serde_json::to_string_pretty(state)
            .map_err(|error| StoreError::Corrupt(error.to_string()))?;
        fs::write(self.snapshot_path(key), raw)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.snapshot_path(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
