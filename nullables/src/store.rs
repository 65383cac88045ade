//! Nullable store — thread-safe in-memory storage for testing.

use pledge_store::{EngineStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory engine store for testing.
pub struct NullStore {
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineStore for NullStore {
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_roundtrips() {
        let store = NullStore::new();
        store.put_meta(b"key", b"value").unwrap();
        assert_eq!(store.get_meta(b"key").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn missing_keys_read_as_none() {
        let store = NullStore::new();
        assert_eq!(store.get_meta(b"absent").unwrap(), None);
    }

    #[test]
    fn puts_overwrite() {
        let store = NullStore::new();
        store.put_meta(b"key", b"one").unwrap();
        store.put_meta(b"key", b"two").unwrap();
        assert_eq!(store.get_meta(b"key").unwrap(), Some(b"two".to_vec()));
    }
}
