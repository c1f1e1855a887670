//! Error kinds shared at the seams between the state store, scheduler, and
//! orchestrator crates. Matched by callers, not just logged, so these are
//! `thiserror` enums rather than `anyhow`.

use thiserror::Error;

use crate::types::ProfileIdError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state store transport error: {0}")]
    Transport(#[source] anyhow::Error),
    #[error("key not found in state store: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("job {name:?} was rejected: already exists")]
    AlreadyExists { name: String },
    #[error("scheduler submission failed: {0}")]
    Submit(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    MalformedProfileId(#[from] ProfileIdError),
    #[error("profile {0:?} could not be read from the state store")]
    ProfileUnreadable(String),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}
