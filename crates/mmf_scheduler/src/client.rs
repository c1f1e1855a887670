use async_trait::async_trait;

use mmf_protocol::{JobDescriptor, SchedulerError};

/// Submits a job descriptor to the external batch-job scheduler.
///
/// A call is synchronous to *acceptance* only: it does not wait for the
/// job to finish running. Implementations must be safe to call
/// concurrently from many dispatcher tasks against one shared handle.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    async fn submit(&self, descriptor: &JobDescriptor) -> Result<(), SchedulerError>;
}
