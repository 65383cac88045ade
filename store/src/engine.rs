use crate::StoreError;

/// Store trait for persisting engine state to durable storage.
///
/// Uses opaque `Vec<u8>` blobs so the store doesn't depend on the engine
/// crate (which would create a circular dependency). The engine serializes
/// and deserializes its own state.
pub trait EngineStore {
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
