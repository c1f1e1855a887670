//! The object every dispatcher and the control loop itself borrows instead of
//! reaching for process-wide statics, so the whole state machine can be
//! driven against in-memory fakes in tests.

use std::sync::Arc;

use mmf_protocol::OrchestratorConfig;
use mmf_scheduler::SchedulerClient;
use mmf_state_store::StateStoreClient;

/// Shared handles threaded into [`crate::profile_dispatcher::ProfileDispatcher`],
/// [`crate::evaluator_dispatcher::EvaluatorDispatcher`], and
/// [`crate::control_loop::ControlLoop`].
///
/// Cheap to clone: the store and scheduler are already `Arc`-friendly handles
/// (a connection manager, an HTTP client) and the config snapshot is
/// immutable for the life of the process.
#[derive(Clone)]
pub struct OrchestratorContext {
    pub store: Arc<dyn StateStoreClient>,
    pub scheduler: Arc<dyn SchedulerClient>,
    pub config: Arc<OrchestratorConfig>,
    /// Scheduler namespace resolved once at startup from `METADATA_NAMESPACE`,
    /// not re-read from the environment on every dispatch.
    pub namespace: String,
}

impl OrchestratorContext {
    pub fn new(
        store: Arc<dyn StateStoreClient>,
        scheduler: Arc<dyn SchedulerClient>,
        config: Arc<OrchestratorConfig>,
        namespace: String,
    ) -> Self {
        Self {
            store,
            scheduler,
            config,
            namespace,
        }
    }
}
