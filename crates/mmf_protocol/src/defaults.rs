//! Default values matching the original orchestrator's documented Viper defaults.

pub const DEFAULT_PROFILE_QUEUE_NAME: &str = "profileq";
pub const DEFAULT_PROFILE_PULL_COUNT: i64 = 10;
pub const DEFAULT_PROPOSAL_QUEUE_NAME: &str = "proposalq";
pub const DEFAULT_EVALUATOR_INTERVAL_SECS: i64 = 60;
pub const DEFAULT_MMF_IMAGE_NAME: &str = "mmf";
pub const DEFAULT_MMF_IMAGE_TAG: &str = "latest";
pub const DEFAULT_EVALUATOR_IMAGE_NAME: &str = "evaluator";
pub const DEFAULT_EVALUATOR_IMAGE_TAG: &str = "latest";
pub const DEFAULT_MMF_IMAGE_JSON_KEY: &str = "image";
pub const DEFAULT_DEBUG: bool = false;

/// The state store key the Orchestrator owns exclusively.
pub const RUNNING_MMF_COUNTER_KEY: &str = "concurrentMMFs";

/// Environment variable naming the scheduler namespace; falls back to the
/// scheduler's own default namespace when unset or empty.
pub const METADATA_NAMESPACE_ENV_VAR: &str = "METADATA_NAMESPACE";

/// Fixed per-iteration pacing delay (S6). Not configurable, matching the
/// original's actual (not aspirational) behavior.
pub const CONTROL_LOOP_SLEEP_MS: u64 = 1000;
