//! Shared domain types, configuration schema, default values, error kinds,
//! and metric name constants for the matchmaking orchestrator workspace.

pub mod config;
pub mod defaults;
pub mod error;
pub mod metrics;
pub mod types;

pub use config::{
    DefaultImagesConfig, EvaluatorConfig, ImageRef, JsonKeysConfig, OrchestratorConfig,
    ProfileQueueConfig, ProposalQueueConfig, QueuesConfig, load_config,
};
pub use error::{DispatchError, SchedulerError, StoreError};
pub use types::{
    EnvVar, EvalReason, JobDescriptor, JobType, ProfileId, ProfileIdError, ProfileIdParts,
    ProposalId, PullPolicy, RestartPolicy,
};
