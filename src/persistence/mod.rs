//! Key-value persistence
//!
//! The game persists a single value (the high score). Storage is injected
//! through [`KeyValueStore`] so the core can be tested without a browser.
//! The LocalStorage implementation lives in `platform::storage` (wasm32 only).

use std::collections::HashMap;

/// Minimal string store. Implementations log and swallow their own failures:
/// a missing or unreadable value is reported as `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store for tests and the headless runner
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "1");
        store.set("k", "2");
        assert_eq!(store.get("k").as_deref(), Some("2"));
    }
}
