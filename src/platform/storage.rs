//! LocalStorage key-value store

use crate::persistence::KeyValueStore;

/// Window LocalStorage. Missing storage (private mode, sandboxed iframe)
/// behaves like an empty store that discards writes.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("LocalStorage read of {} failed: {:?}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, {} not saved", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("LocalStorage write of {} failed: {:?}", key, e);
        }
    }
}
