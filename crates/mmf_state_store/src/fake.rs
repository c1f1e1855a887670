use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use mmf_protocol::StoreError;

use crate::state_store::StateStoreClient;

/// In-memory [`StateStoreClient`] used by control-loop and dispatcher tests.
/// Mirrors the Redis contract exactly, including "absent key" semantics for
/// counters and hashes, so tests exercise real control-flow decisions rather
/// than a stub.
#[derive(Default)]
pub struct FakeStateStore {
    sets: Mutex<HashMap<String, HashSet<String>>>,
    hashes: Mutex<HashMap<String, HashMap<String, String>>>,
    counters: Mutex<HashMap<String, i64>>,
}

impl FakeStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_set(&self, queue_name: &str, members: impl IntoIterator<Item = String>) {
        self.sets
            .lock()
            .unwrap()
            .entry(queue_name.to_string())
            .or_default()
            .extend(members);
    }

    pub fn seed_hash(&self, key: &str, fields: HashMap<String, String>) {
        self.hashes.lock().unwrap().insert(key.to_string(), fields);
    }

    pub fn seed_counter(&self, key: &str, value: i64) {
        self.counters.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn set_len(&self, queue_name: &str) -> usize {
        self.sets
            .lock()
            .unwrap()
            .get(queue_name)
            .map(|set| set.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl StateStoreClient for FakeStateStore {
    async fn pop_profiles(&self, queue_name: &str, n: i64) -> Result<Vec<String>, StoreError> {
        let mut sets = self.sets.lock().unwrap();
        let Some(set) = sets.get_mut(queue_name) else {
            return Ok(Vec::new());
        };
        let n = n.max(0) as usize;
        let popped: Vec<String> = set.iter().take(n).cloned().collect();
        for member in &popped {
            set.remove(member);
        }
        Ok(popped)
    }

    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        self.hashes
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().unwrap();
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }

    async fn read_counter(&self, key: &str) -> Result<i64, StoreError> {
        self.counters
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn queue_size(&self, key: &str) -> Result<i64, StoreError> {
        Ok(self
            .sets
            .lock()
            .unwrap()
            .get(key)
            .map(|set| set.len() as i64)
            .unwrap_or(0))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.counters.lock().unwrap().remove(key);
        self.hashes.lock().unwrap().remove(key);
        self.sets.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pop_profiles_on_empty_queue_returns_empty_vec() {
        let store = FakeStateStore::new();
        let popped = store.pop_profiles("profileq", 10).await.unwrap();
        assert!(popped.is_empty());
    }

    #[tokio::test]
    async fn pop_profiles_removes_members() {
        let store = FakeStateStore::new();
        store.seed_set("profileq", ["moA.profA".to_string(), "moB.profB".to_string()]);
        let popped = store.pop_profiles("profileq", 1).await.unwrap();
        assert_eq!(popped.len(), 1);
        assert_eq!(store.set_len("profileq"), 1);
    }

    #[tokio::test]
    async fn counter_absent_is_not_found() {
        let store = FakeStateStore::new();
        assert!(matches!(
            store.read_counter("concurrentMMFs").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn increment_creates_counter_at_one() {
        let store = FakeStateStore::new();
        let value = store.increment("concurrentMMFs").await.unwrap();
        assert_eq!(value, 1);
        let value = store.increment("concurrentMMFs").await.unwrap();
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = FakeStateStore::new();
        store.delete("concurrentMMFs").await.unwrap();
        store.seed_counter("concurrentMMFs", 3);
        store.delete("concurrentMMFs").await.unwrap();
        assert!(matches!(
            store.read_counter("concurrentMMFs").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
