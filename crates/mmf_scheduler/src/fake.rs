use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use mmf_protocol::{JobDescriptor, SchedulerError};

use crate::client::SchedulerClient;

/// In-memory [`SchedulerClient`] used by dispatcher and control-loop tests.
/// Records every accepted submission and can be configured to reject
/// duplicate names, the way a real scheduler rejects a job name collision
/// (see spec scenario E6).
#[derive(Default)]
pub struct FakeSchedulerClient {
    submitted: Mutex<Vec<JobDescriptor>>,
    names_seen: Mutex<HashSet<String>>,
    reject_all: Mutex<bool>,
}

impl FakeSchedulerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Causes every subsequent `submit` call to fail, simulating a
    /// scheduler outage.
    pub fn reject_all(&self, reject: bool) {
        *self.reject_all.lock().unwrap() = reject;
    }

    pub fn submitted(&self) -> Vec<JobDescriptor> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn submitted_names(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|job| job.name.clone())
            .collect()
    }
}

#[async_trait]
impl SchedulerClient for FakeSchedulerClient {
    async fn submit(&self, descriptor: &JobDescriptor) -> Result<(), SchedulerError> {
        if *self.reject_all.lock().unwrap() {
            return Err(SchedulerError::Submit(anyhow::anyhow!(
                "fake scheduler configured to reject all submissions"
            )));
        }
        let mut names = self.names_seen.lock().unwrap();
        if !names.insert(descriptor.name.clone()) {
            return Err(SchedulerError::AlreadyExists {
                name: descriptor.name.clone(),
            });
        }
        self.submitted.lock().unwrap().push(descriptor.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmf_protocol::{EnvVar, JobType, PullPolicy, RestartPolicy};

    fn sample_job(name: &str) -> JobDescriptor {
        JobDescriptor {
            name: name.to_string(),
            job_type: JobType::Mmf,
            image: "mmf:latest".to_string(),
            env: vec![EnvVar::new("MMF_TIMESTAMP", "1700000000")],
            namespace: "default".to_string(),
            restart_policy: RestartPolicy::Never,
            pull_policy: PullPolicy::Always,
            completions: 1,
        }
    }

    #[tokio::test]
    async fn rejects_duplicate_job_names() {
        let scheduler = FakeSchedulerClient::new();
        scheduler.submit(&sample_job("job-a")).await.unwrap();
        let result = scheduler.submit(&sample_job("job-a")).await;
        assert!(matches!(result, Err(SchedulerError::AlreadyExists { .. })));
        assert_eq!(scheduler.submitted().len(), 1);
    }

    #[tokio::test]
    async fn reject_all_simulates_outage() {
        let scheduler = FakeSchedulerClient::new();
        scheduler.reject_all(true);
        let result = scheduler.submit(&sample_job("job-a")).await;
        assert!(result.is_err());
        assert!(scheduler.submitted().is_empty());
    }
}
