//! §4.E ControlLoop: the one supervisory state machine. Pulls profiles,
//! spawns dispatchers, and decides when to run the evaluator. Everything
//! else in this crate exists to be called from here.

use std::time::{Duration, Instant};

use anyhow::Context as _;
use tokio::sync::watch;

use mmf_protocol::{defaults, EvalReason, StoreError};

use crate::context::OrchestratorContext;
use crate::evaluator_dispatcher::EvaluatorDispatcher;
use crate::profile_dispatcher::ProfileDispatcher;

const S6_SLEEP: Duration = Duration::from_millis(defaults::CONTROL_LOOP_SLEEP_MS);

/// The supervisory task. Holds the one piece of in-process state the spec
/// calls out: the monotonic timer since the last evaluator decision point.
pub struct ControlLoop {
    ctx: OrchestratorContext,
    last_eval: Instant,
}

impl ControlLoop {
    pub fn new(ctx: OrchestratorContext) -> Self {
        Self {
            ctx,
            last_eval: Instant::now(),
        }
    }

    /// Runs iterations until `shutdown` reports `true`. Aborts the current
    /// sleep (not the in-flight step) on shutdown, matching §5's
    /// cancellation contract.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        while !*shutdown.borrow() {
            self.run_iteration().await?;

            tokio::select! {
                _ = tokio::time::sleep(S6_SLEEP) => {}
                _ = shutdown.changed() => {}
            }
        }
        tracing::info!("control loop received shutdown signal, exiting");
        Ok(())
    }

    /// One pass through S0–S6. Returns an error only for the fatal
    /// condition (§7): the profile pop itself failing. Every other
    /// substep's error is logged and absorbed so the loop keeps running.
    /// Exposed directly (not just via [`Self::run`]) so tests can drive one
    /// iteration at a time without the S6 sleep.
    pub async fn run_iteration(&mut self) -> anyhow::Result<()> {
        self.drain_and_spawn_profiles().await?;

        let eval_decision = self.decide_evaluator().await;
        match eval_decision {
            EvalDecision::SkipThisIteration => {}
            EvalDecision::CheckProposals(reason) => {
                self.check_proposals_and_maybe_evaluate(reason).await;
            }
        }

        Ok(())
    }

    /// S0 + S1: pop a batch, spawn one dispatcher task per profile, and
    /// increment the running-MMF counter once per spawn, synchronously, in
    /// this loop, not inside the spawned task, so invariant 1 (increment
    /// before this iteration's counter read) holds regardless of scheduler
    /// latency.
    async fn drain_and_spawn_profiles(&self) -> anyhow::Result<()> {
        let queue_name = &self.ctx.config.queues.profiles.name;
        let pull_count = self.ctx.config.queues.profiles.pull_count;

        tracing::debug!(
            profile_queue_name = %queue_name,
            pull_count,
            "retrieving match profiles"
        );

        let batch = self
            .ctx
            .store
            .pop_profiles(queue_name, pull_count)
            .await
            .context("profile pop failed, control loop cannot proceed")?;

        if batch.is_empty() {
            tracing::debug!(profile_queue_name = %queue_name, "unable to retrieve match profiles from state storage - have you entered any?");
            return Ok(());
        }

        tracing::info!(num_profiles = batch.len(), "starting mmf jobs...");

        for profile_id in batch {
            let dispatcher = ProfileDispatcher::new(self.ctx.clone());
            let id = profile_id.clone();
            tokio::spawn(async move {
                dispatcher.dispatch(id).await;
            });

            if let Err(err) = self.ctx.store.increment(defaults::RUNNING_MMF_COUNTER_KEY).await {
                tracing::error!(error = %err, "failed to increment concurrentMMFs counter");
            }
        }

        Ok(())
    }

    /// S2 + S3: reads the running counter and applies the decision table.
    async fn decide_evaluator(&mut self) -> EvalDecision {
        let interval = Duration::from_secs(self.ctx.config.evaluator.interval.max(0) as u64);

        let counter = match self.ctx.store.read_counter(defaults::RUNNING_MMF_COUNTER_KEY).await {
            Ok(value) => value,
            Err(StoreError::NotFound(_)) => {
                tracing::debug!("number of concurrentMMFs is nil");
                self.last_eval = Instant::now();
                return EvalDecision::SkipThisIteration;
            }
            Err(err) => {
                tracing::error!(error = %err, "issue retrieving number of currently running MMFs, treating as absent");
                self.last_eval = Instant::now();
                return EvalDecision::SkipThisIteration;
            }
        };

        if self.last_eval.elapsed() >= interval {
            tracing::info!(interval_secs = interval.as_secs(), "maximum evaluator interval exceeded");
            EvalDecision::CheckProposals(EvalReason::IntervalExceeded)
        } else if counter <= 0 {
            tracing::info!("all mmfs complete");
            EvalDecision::CheckProposals(EvalReason::MmfsCompleted)
        } else {
            EvalDecision::SkipThisIteration
        }
    }

    /// S4 + S5: queries the proposal queue, spawns the evaluator if
    /// non-empty, then unconditionally deletes the counter and resets the
    /// timer. The deletion happens regardless of whether S5 actually ran.
    async fn check_proposals_and_maybe_evaluate(&mut self, reason: EvalReason) {
        tracing::info!("checking state storage for match object proposals");

        let proposal_queue = &self.ctx.config.queues.proposals.name;
        match self.ctx.store.queue_size(proposal_queue).await {
            Err(err) => {
                tracing::error!(error = %err, "couldn't retrieve the length of the proposal queue from state storage!");
            }
            Ok(0) => {
                tracing::warn!("no proposals in the queue!");
            }
            Ok(num_proposals) => {
                tracing::info!(num_proposals, "proposals available, evaluating!");
                let ctx = self.ctx.clone();
                tokio::spawn(async move {
                    EvaluatorDispatcher::new(ctx).dispatch(reason).await;
                });
            }
        }

        if let Err(err) = self.ctx.store.delete(defaults::RUNNING_MMF_COUNTER_KEY).await {
            tracing::error!(error = %err, "error deleting concurrent mmf counter!");
        }
        self.last_eval = Instant::now();
    }

    /// Test hook: rewinds the internal evaluator timer by `elapsed`, so
    /// tests can exercise the interval-timeout path without sleeping.
    pub fn backdate_timer(&mut self, elapsed: Duration) {
        self.last_eval = Instant::now() - elapsed;
    }
}

enum EvalDecision {
    SkipThisIteration,
    CheckProposals(EvalReason),
}
