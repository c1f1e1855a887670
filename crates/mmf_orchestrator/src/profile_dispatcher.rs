//! §4.C ProfileDispatcher: resolves one profile ID into an MMF job
//! descriptor and submits it. Never propagates an error to its caller:
//! every failure mode here is a metric increment and a log line, by design
//! (see spec §7, §9 open question 2).

use serde_json::Value;

use mmf_protocol::{EnvVar, JobDescriptor, JobType, ProfileId, PullPolicy, RestartPolicy};

use crate::context::OrchestratorContext;
use crate::metrics::METRICS;

pub struct ProfileDispatcher {
    ctx: OrchestratorContext,
}

impl ProfileDispatcher {
    pub fn new(ctx: OrchestratorContext) -> Self {
        Self { ctx }
    }

    /// Runs to completion inline; callers spawn this onto its own task so it
    /// never blocks the control loop.
    pub async fn dispatch(&self, profile_id: String) {
        let id = ProfileId::new(profile_id.clone());
        let parts = match id.split() {
            Ok(parts) => parts,
            Err(err) => {
                tracing::error!(profile_id = %profile_id, error = %err, "malformed profile id, skipping dispatch");
                METRICS.inc_mmf_failures();
                return;
            }
        };

        let timestamp = current_unix_seconds();
        let job_name = format!(
            "{}.{}.{}.{}",
            timestamp,
            parts.match_object_id,
            parts.profile_id,
            JobType::Mmf.label()
        );
        let proposal_id =
            mmf_protocol::ProposalId::new(timestamp, &parts);

        let image = match self.resolve_image(&parts.profile_id, &job_name).await {
            Ok(image) => image,
            Err(()) => {
                METRICS.inc_mmf_failures();
                return;
            }
        };

        let env = vec![
            EnvVar::new("MMF_PROFILE_ID", parts.profile_id.as_str()),
            EnvVar::new("MMF_PROPOSAL_ID", proposal_id.as_str()),
            EnvVar::new("MMF_REQUEST_ID", parts.match_object_id.as_str()),
            EnvVar::new("MMF_ERROR_ID", profile_id.as_str()),
            EnvVar::new("MMF_TIMESTAMP", timestamp.to_string()),
            EnvVar::new("PROFILE", legacy_profile_alias(&job_name)),
        ];

        let descriptor = JobDescriptor {
            name: job_name.clone(),
            job_type: JobType::Mmf,
            image,
            env,
            namespace: self.ctx.namespace.clone(),
            restart_policy: RestartPolicy::Never,
            pull_policy: PullPolicy::Always,
            completions: 1,
        };

        if self.ctx.config.debug {
            tracing::debug!(
                job_type = %JobType::Mmf,
                backend_match_object = %parts.match_object_id,
                profile = %parts.profile_id,
                job_timestamp = timestamp,
                container_image = %descriptor.image,
                job_name = %job_name,
                profile_image_json_key = %self.ctx.config.json_keys.mmf_image,
                "attempting to create mmf job"
            );
        } else {
            tracing::info!(job_name = %job_name, "attempting to create mmf job");
        }

        match self.ctx.scheduler.submit(&descriptor).await {
            Ok(()) => {
                METRICS.inc_mmfs();
            }
            Err(err) => {
                tracing::error!(job_name = %job_name, error = %err, "mmf job submission failure");
                METRICS.inc_mmf_failures();
            }
        }
    }

    /// Starts from the configured default image, then overrides it if the
    /// profile's `properties` JSON has a string at the configured path.
    /// Returns `Err(())` if the profile hash itself could not be read; no
    /// job is submitted in that case.
    async fn resolve_image(&self, profile_id: &str, job_name: &str) -> Result<String, ()> {
        let default_image = self.ctx.config.default_images.mmf.reference();

        let fields = match self.ctx.store.read_hash(profile_id).await {
            Ok(fields) => fields,
            Err(err) => {
                tracing::error!(job_name = %job_name, error = %err, "failure retrieving profile from state store");
                return Err(());
            }
        };

        let Some(properties) = fields.get("properties") else {
            return Ok(default_image);
        };

        let parsed: Value = match serde_json::from_str(properties) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(job_name = %job_name, "properties is not valid json, using default image instead");
                return Ok(default_image);
            }
        };

        let key = &self.ctx.config.json_keys.mmf_image;
        match json_lookup(&parsed, key) {
            Some(Value::String(image)) => Ok(image),
            _ => {
                tracing::warn!(job_name = %job_name, json_key = %key, "failed to read image name from profile at configured json key, using default image instead");
                Ok(default_image)
            }
        }
    }
}

/// Looks up a dotted JSON path (`"a.b.c"`) inside a parsed document. A bare
/// key with no dot is the common case and resolves as a single field lookup.
fn json_lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| current.get(segment))
}

/// The deprecated `PROFILE` env var: the job name minus its trailing
/// `.mmf`/`.evaluator` component, kept verbatim for backward compatibility.
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    use mmf_protocol::OrchestratorConfig;
    use mmf_scheduler::FakeSchedulerClient;
    use mmf_state_store::FakeStateStore;

    fn ctx(store: Arc<FakeStateStore>, scheduler: Arc<FakeSchedulerClient>) -> OrchestratorContext {
        OrchestratorContext::new(
            store,
            scheduler,
            Arc::new(OrchestratorConfig::default()),
            "default".to_string(),
        )
    }

    #[tokio::test]
    async fn malformed_profile_id_emits_failure_and_submits_nothing() {
        let store = Arc::new(FakeStateStore::new());
        let scheduler = Arc::new(FakeSchedulerClient::new());
        let dispatcher = ProfileDispatcher::new(ctx(store, scheduler.clone()));

        dispatcher.dispatch("badprofile".to_string()).await;

        assert!(scheduler.submitted().is_empty());
    }

    #[tokio::test]
    async fn unreadable_profile_submits_nothing() {
        let store = Arc::new(FakeStateStore::new());
        let scheduler = Arc::new(FakeSchedulerClient::new());
        let dispatcher = ProfileDispatcher::new(ctx(store, scheduler.clone()));

        dispatcher.dispatch("moA.profA".to_string()).await;

        assert!(scheduler.submitted().is_empty());
    }

    #[tokio::test]
    async fn happy_path_overrides_image_and_sets_env() {
        let store = Arc::new(FakeStateStore::new());
        let mut fields = HashMap::new();
        fields.insert(
            "properties".to_string(),
            r#"{"image":"custom/mmf:v2"}"#.to_string(),
        );
        store.seed_hash("profA", fields);
        let scheduler = Arc::new(FakeSchedulerClient::new());
        let dispatcher = ProfileDispatcher::new(ctx(store, scheduler.clone()));

        dispatcher.dispatch("moA.profA".to_string()).await;

        let submitted = scheduler.submitted();
        assert_eq!(submitted.len(), 1);
        let job = &submitted[0];
        assert_eq!(job.image, "custom/mmf:v2");
        assert!(regex_matches_mmf_job_name(&job.name));

        let get = |name: &str| job.env.iter().find(|e| e.name == name).map(|e| e.value.clone());
        assert_eq!(get("MMF_PROFILE_ID"), Some("profA".to_string()));
        assert_eq!(get("MMF_REQUEST_ID"), Some("moA".to_string()));
        assert_eq!(get("MMF_ERROR_ID"), Some("moA.profA".to_string()));
        let proposal = get("MMF_PROPOSAL_ID").unwrap();
        assert!(proposal.starts_with("proposal."));
        assert!(proposal.ends_with(".moA.profA"));
    }

    #[tokio::test]
    async fn default_image_used_when_properties_missing_override() {
        let store = Arc::new(FakeStateStore::new());
        let mut fields = HashMap::new();
        fields.insert("properties".to_string(), r#"{"other":"value"}"#.to_string());
        store.seed_hash("profA", fields);
        let scheduler = Arc::new(FakeSchedulerClient::new());
        let dispatcher = ProfileDispatcher::new(ctx(store, scheduler.clone()));

        dispatcher.dispatch("moA.profA".to_string()).await;

        let submitted = scheduler.submitted();
        assert_eq!(submitted[0].image, "mmf:latest");
    }

    fn regex_matches_mmf_job_name(name: &str) -> bool {
        let mut parts = name.split('.');
        let timestamp = parts.next().unwrap_or("");
        let mo = parts.next().unwrap_or("");
        let prof = parts.next().unwrap_or("");
        let suffix = parts.next().unwrap_or("");
        !timestamp.is_empty()
            && timestamp.chars().all(|c| c.is_ascii_digit())
            && !mo.is_empty()
            && !prof.is_empty()
            && suffix == "mmf"
            && parts.next().is_none()
    }
}
