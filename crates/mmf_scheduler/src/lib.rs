//! Batch-job scheduler client for the matchmaking orchestrator.

pub mod client;
pub mod fake;
pub mod http_client;

pub use client::SchedulerClient;
pub use fake::FakeSchedulerClient;
pub use http_client::HttpSchedulerClient;
