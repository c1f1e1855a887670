//! Metrics Module for Observability
//!
//! In-memory counters for the control loop and dispatchers, exposed as
//! Prometheus text. Designed the same way this workspace's other
//! control-plane metrics are: plain atomics, single static instance,
//! lock-free increments.

use std::sync::atomic::{AtomicU64, Ordering};

use mmf_logging::LOG_LINE_COUNTS;
use mmf_protocol::{metrics as metric_names, EvalReason};

/// Global metrics instance - lock-free atomics for counters.
pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    mmfs: AtomicU64,
    mmf_failures: AtomicU64,
    evals: AtomicU64,
    eval_failures: AtomicU64,
    evals_interval_exceeded: AtomicU64,
    evals_mmfs_completed: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            mmfs: AtomicU64::new(0),
            mmf_failures: AtomicU64::new(0),
            evals: AtomicU64::new(0),
            eval_failures: AtomicU64::new(0),
            evals_interval_exceeded: AtomicU64::new(0),
            evals_mmfs_completed: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn inc_mmfs(&self) {
        self.mmfs.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_mmf_failures(&self) {
        self.mmf_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn inc_evals(&self, reason: EvalReason) {
        self.evals.fetch_add(1, Ordering::Relaxed);
        match reason {
            EvalReason::IntervalExceeded => {
                self.evals_interval_exceeded.fetch_add(1, Ordering::Relaxed);
            }
            EvalReason::MmfsCompleted => {
                self.evals_mmfs_completed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[inline]
    pub fn inc_eval_failures(&self) {
        self.eval_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            mmfs: self.mmfs.load(Ordering::Relaxed),
            mmf_failures: self.mmf_failures.load(Ordering::Relaxed),
            evals: self.evals.load(Ordering::Relaxed),
            eval_failures: self.eval_failures.load(Ordering::Relaxed),
            evals_interval_exceeded: self.evals_interval_exceeded.load(Ordering::Relaxed),
            evals_mmfs_completed: self.evals_mmfs_completed.load(Ordering::Relaxed),
            log_lines: LOG_LINE_COUNTS.snapshot(),
        }
    }

    /// Format as Prometheus exposition format.
    pub fn prometheus_format(&self) -> String {
        let s = self.snapshot();
        format!(
            r#"# HELP {mmfs_name} Total MMF jobs successfully submitted to the scheduler
# TYPE {mmfs_name} counter
{mmfs_name} {mmfs}

# HELP {mmf_failures_name} Total MMF dispatches that failed before or during submission
# TYPE {mmf_failures_name} counter
{mmf_failures_name} {mmf_failures}

# HELP {evals_name} Total evaluator jobs successfully submitted to the scheduler
# TYPE {evals_name} counter
{evals_name} {evals}

# HELP {eval_failures_name} Total evaluator dispatches that failed before or during submission
# TYPE {eval_failures_name} counter
{eval_failures_name} {eval_failures}

# HELP mmforc_evals_interval_exceeded_total Evaluator dispatches triggered by interval timeout
# TYPE mmforc_evals_interval_exceeded_total counter
mmforc_evals_interval_exceeded_total {evals_interval_exceeded}

# HELP mmforc_evals_mmfs_completed_total Evaluator dispatches triggered by MMF quiescence
# TYPE mmforc_evals_mmfs_completed_total counter
mmforc_evals_mmfs_completed_total {evals_mmfs_completed}

# HELP mmforc_log_lines_total Log lines emitted, by severity
# TYPE mmforc_log_lines_total counter
mmforc_log_lines_total{{level="error"}} {log_error}
mmforc_log_lines_total{{level="warn"}} {log_warn}
mmforc_log_lines_total{{level="info"}} {log_info}
mmforc_log_lines_total{{level="debug"}} {log_debug}
mmforc_log_lines_total{{level="trace"}} {log_trace}
"#,
            mmfs_name = metric_names::MMFS,
            mmfs = s.mmfs,
            mmf_failures_name = metric_names::MMF_FAILURES,
            mmf_failures = s.mmf_failures,
            evals_name = metric_names::EVALS,
            evals = s.evals,
            eval_failures_name = metric_names::EVAL_FAILURES,
            eval_failures = s.eval_failures,
            evals_interval_exceeded = s.evals_interval_exceeded,
            evals_mmfs_completed = s.evals_mmfs_completed,
            log_error = s.log_lines.error,
            log_warn = s.log_lines.warn,
            log_info = s.log_lines.info,
            log_debug = s.log_lines.debug,
            log_trace = s.log_lines.trace,
        )
    }
}

/// Immutable snapshot of metrics for reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub mmfs: u64,
    pub mmf_failures: u64,
    pub evals: u64,
    pub eval_failures: u64,
    pub evals_interval_exceeded: u64,
    pub evals_mmfs_completed: u64,
    pub log_lines: mmf_logging::LogLineCountsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_increment() {
        let metrics = Metrics::new();
        metrics.inc_mmfs();
        metrics.inc_mmfs();
        metrics.inc_mmf_failures();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.mmfs, 2);
        assert_eq!(snapshot.mmf_failures, 1);
    }

    #[test]
    fn test_eval_reason_splits_into_two_counters() {
        let metrics = Metrics::new();
        metrics.inc_evals(EvalReason::IntervalExceeded);
        metrics.inc_evals(EvalReason::MmfsCompleted);
        metrics.inc_evals(EvalReason::MmfsCompleted);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.evals, 3);
        assert_eq!(snapshot.evals_interval_exceeded, 1);
        assert_eq!(snapshot.evals_mmfs_completed, 2);
    }

    #[test]
    fn test_prometheus_format() {
        let metrics = Metrics::new();
        metrics.inc_mmfs();
        let output = metrics.prometheus_format();
        assert!(output.contains("mmforc.mmfs 1"));
    }
}
