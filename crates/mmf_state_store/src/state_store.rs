use async_trait::async_trait;
use std::collections::HashMap;

use mmf_protocol::StoreError;

/// Thin typed wrapper over the external key/value store the control loop
/// reads the profile queue and running-MMF counter from.
///
/// All six operations are the complete surface the control loop and
/// dispatchers need; this is deliberately not a general key/value client.
#[async_trait]
pub trait StateStoreClient: Send + Sync {
    /// Atomically removes up to `n` arbitrary members from the named set and
    /// returns them. An empty set yields an empty `Vec`, not an error.
    async fn pop_profiles(&self, queue_name: &str, n: i64) -> Result<Vec<String>, StoreError>;

    /// Returns all fields of a hash. `StoreError::NotFound` if the key is
    /// absent.
    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// Atomically increments an integer counter by one, creating it at `1`
    /// if absent, and returns the new value.
    async fn increment(&self, key: &str) -> Result<i64, StoreError>;

    /// Reads an integer counter. `StoreError::NotFound` if absent; callers
    /// must distinguish "absent" from "zero".
    async fn read_counter(&self, key: &str) -> Result<i64, StoreError>;

    /// Cardinality of a named collection; zero if the key is absent.
    async fn queue_size(&self, key: &str) -> Result<i64, StoreError>;

    /// Deletes a key. Idempotent: deleting an absent key is success.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
