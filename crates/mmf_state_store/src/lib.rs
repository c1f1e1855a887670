//! State store client for the matchmaking orchestrator: a thin typed
//! wrapper over the external Redis-compatible key/value store.

pub mod fake;
pub mod redis_store;
pub mod state_store;

pub use fake::FakeStateStore;
pub use redis_store::RedisStateStore;
pub use state_store::StateStoreClient;
