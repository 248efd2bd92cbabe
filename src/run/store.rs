//! String key-value persistence seam.
//!
//! The host owns actual storage (preferences file, browser storage, a
//! database row). The run layer only needs to read, write and delete one
//! string per key.

use rustc_hash::FxHashMap;

/// Minimal persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn remove(&mut self, key: &str);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store for tests and hosts without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
