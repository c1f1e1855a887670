//! Canonical metric names emitted by the orchestrator. Kept here, not
//! string-literal at each call site, to avoid stringly-typed drift between
//! the dispatcher code and whatever exports these (tests, `/metrics`).

pub const MMFS: &str = "mmforc.mmfs";
pub const MMF_FAILURES: &str = "mmforc.mmf_failures";
pub const EVALS: &str = "mmforc.evals";
pub const EVAL_FAILURES: &str = "mmforc.eval_failures";

/// `eval_reason` tag values, tracked as separate counters since the
/// exposition format this crate uses is label-free.
pub const EVAL_REASON_INTERVAL_EXCEEDED: &str = "interval_exceeded";
pub const EVAL_REASON_MMFS_COMPLETED: &str = "mmfs_completed";
