//! The matchmaking orchestrator control loop: `ProfileDispatcher`,
//! `EvaluatorDispatcher`, `ControlLoop`, and the in-process `Metrics` they
//! share, threaded together by an `OrchestratorContext`.

pub mod context;
pub mod control_loop;
pub mod evaluator_dispatcher;
pub mod metrics;
pub mod profile_dispatcher;

pub use context::OrchestratorContext;
pub use control_loop::ControlLoop;
pub use evaluator_dispatcher::EvaluatorDispatcher;
pub use metrics::{Metrics, MetricsSnapshot, METRICS};
pub use profile_dispatcher::ProfileDispatcher;
