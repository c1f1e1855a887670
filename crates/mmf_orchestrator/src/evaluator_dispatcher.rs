//! §4.D EvaluatorDispatcher: builds and submits the single evaluator job
//! descriptor. Carries the `eval_reason` the control loop decided on, purely
//! for the log line and the split `evals_*` metric (§11.2).

use mmf_protocol::{EnvVar, EvalReason, JobDescriptor, JobType, PullPolicy, RestartPolicy};

use crate::context::OrchestratorContext;
use crate::metrics::METRICS;

pub struct EvaluatorDispatcher {
    ctx: OrchestratorContext,
}

impl EvaluatorDispatcher {
    pub fn new(ctx: OrchestratorContext) -> Self {
        Self { ctx }
    }

    pub async fn dispatch(&self, reason: EvalReason) {
        let timestamp = current_unix_seconds();
        let job_name = format!("{}.{}", timestamp, JobType::Evaluator.label());
        let image = self.ctx.config.default_images.evaluator.reference();

        let env = vec![
            EnvVar::new("MMF_TIMESTAMP", timestamp.to_string()),
            EnvVar::new("PROFILE", legacy_profile_alias(&job_name)),
        ];

        let descriptor = JobDescriptor {
            name: job_name.clone(),
            job_type: JobType::Evaluator,
            image: image.clone(),
            env,
            namespace: self.ctx.namespace.clone(),
            restart_policy: RestartPolicy::Never,
            pull_policy: PullPolicy::Always,
            completions: 1,
        };

        tracing::info!(
            job_name = %job_name,
            container_image = %image,
            eval_reason = %reason,
            "attempting to create evaluator job"
        );

        match self.ctx.scheduler.submit(&descriptor).await {
            Ok(()) => {
                METRICS.inc_evals(reason);
            }
            Err(err) => {
                tracing::error!(job_name = %job_name, container_image = %image, error = %err, "evaluator job submission failure");
                METRICS.inc_eval_failures();
            }
        }
    }
}

fn legacy_profile_alias(job_name: &str) -> String {
    let mut segments: Vec<&str> = job_name.split('.').collect();
    segments.pop();
    segments.join(".")
}

fn current_unix_seconds() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
