//! Local key-value blob storage for the two persisted collections.
//!
//! Each collection is one JSON array under a fixed key; a key maps to a
//! single file in the state directory. Writes always replace the whole
//! serialized collection. Missing or unreadable data loads as an empty
//! collection and is never fatal; write failures propagate to the caller.

use std::{collections::HashMap, fs, path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::{
    Result,
    fs::state_dir,
    model::{Draft, ServiceLog},
};

const LOGS_KEY: &str = "service-logs";
const DRAFTS_KEY: &str = "service-logs-drafts";

#[derive(Debug)]
enum Backend {
    Disk(PathBuf),
    Memory(RwLock<HashMap<String, String>>),
}

/// Handle to the on-device key-value store backing both collections.
///
/// Cheap to clone; all clones share the same backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    backend: Arc<Backend>,
}

impl LocalStore {
    /// Open the store in the user's state directory.
    pub fn new() -> Self {
        Self::at(state_dir())
    }

    /// Open a store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: Arc::new(Backend::Disk(dir.into())),
        }
    }

    /// A memory backed store for use in tests.
    #[cfg(test)]
    pub(crate) fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(RwLock::new(HashMap::new()))),
        }
    }

    // Service logs

    pub fn load_logs(&self) -> Vec<ServiceLog> {
        self.load(LOGS_KEY)
    }

    pub fn save_logs(&self, logs: &[ServiceLog]) -> Result<()> {
        self.store(LOGS_KEY, logs)
    }

    /// Insert or replace a single log, keyed by id.
    pub fn save_log(&self, log: &ServiceLog) -> Result<()> {
        let mut logs = self.load_logs();
        upsert(&mut logs, log.clone(), |l| l.id == log.id);
        self.save_logs(&logs)
    }

    pub fn delete_log(&self, id: &str) -> Result<()> {
        let mut logs = self.load_logs();
        logs.retain(|log| log.id != id);
        self.save_logs(&logs)
    }

    // Drafts

    pub fn load_drafts(&self) -> Vec<Draft> {
        self.load(DRAFTS_KEY)
    }

    pub fn save_drafts(&self, drafts: &[Draft]) -> Result<()> {
        self.store(DRAFTS_KEY, drafts)
    }

    /// Insert or replace a single draft, keyed by id.
    pub fn save_draft(&self, draft: &Draft) -> Result<()> {
        let mut drafts = self.load_drafts();
        upsert(&mut drafts, draft.clone(), |d| d.id == draft.id);
        self.save_drafts(&drafts)
    }

    pub fn delete_draft(&self, id: &str) -> Result<()> {
        let mut drafts = self.load_drafts();
        drafts.retain(|draft| draft.id != id);
        self.save_drafts(&drafts)
    }

    /// Drop the draft collection's key entirely.
    pub fn clear_drafts(&self) -> Result<()> {
        self.remove(DRAFTS_KEY)
    }

    // Blob plumbing

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(contents) = self.get(key) else {
            return Vec::new();
        };

        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(err) => {
                warn!("Discarding unreadable collection under '{key}': {err}");
                Vec::new()
            }
        }
    }

    fn store<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.set(key, serde_json::to_string(items)?)
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.backend.as_ref() {
            Backend::Disk(dir) => fs::read_to_string(dir.join(format!("{key}.json"))).ok(),
            Backend::Memory(map) => map.read().get(key).cloned(),
        }
    }

    fn set(&self, key: &str, contents: String) -> Result<()> {
        match self.backend.as_ref() {
            Backend::Disk(dir) => {
                fs::create_dir_all(dir)?;
                fs::write(dir.join(format!("{key}.json")), contents)?;
            }
            Backend::Memory(map) => {
                map.write().insert(key.to_string(), contents);
            }
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.backend.as_ref() {
            Backend::Disk(dir) => {
                let path = dir.join(format!("{key}.json"));
                if path.exists() {
                    fs::remove_file(path)?;
                }
            }
            Backend::Memory(map) => {
                map.write().remove(key);
            }
        }

        Ok(())
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, matches: impl Fn(&T) -> bool) {
    if let Some(slot) = items.iter_mut().find(|existing| matches(existing)) {
        *slot = item;
    } else {
        items.push(item);
    }
}
