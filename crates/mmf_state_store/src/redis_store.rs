use std::collections::HashMap;

use async_trait::async_trait;
use mmf_protocol::StoreError;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::state_store::StateStoreClient;

/// Redis-backed [`StateStoreClient`]. Uses a multiplexed connection manager
/// so every call borrows the same underlying connection without an explicit
/// pool, the same "one long-lived handle, safe for concurrent use" shape
/// the scheduler client uses for its HTTP connection pool.
pub struct RedisStateStore {
    conn: ConnectionManager,
}

impl RedisStateStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|err| StoreError::Transport(err.into()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|err| StoreError::Transport(err.into()))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl StateStoreClient for RedisStateStore {
    async fn pop_profiles(&self, queue_name: &str, n: i64) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = redis::cmd("SPOP")
            .arg(queue_name)
            .arg(n)
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreError::Transport(err.into()))?;
        Ok(members)
    }

    async fn read_hash(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(key)
            .await
            .map_err(|err| StoreError::Transport(err.into()))?;
        if fields.is_empty() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        Ok(fields)
    }

    async fn increment(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        conn.incr(key, 1)
            .await
            .map_err(|err| StoreError::Transport(err.into()))
    }

    async fn read_counter(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<i64> = conn
            .get(key)
            .await
            .map_err(|err| StoreError::Transport(err.into()))?;
        value.ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    async fn queue_size(&self, key: &str) -> Result<i64, StoreError> {
        let mut conn = self.conn.clone();
        // SCARD returns 0 for an absent key, matching the spec's contract.
        conn.scard(key)
            .await
            .map_err(|err| StoreError::Transport(err.into()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .del(key)
            .await
            .map_err(|err| StoreError::Transport(err.into()))?;
        Ok(())
    }
}
