use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use mmf_protocol::{JobDescriptor, SchedulerError};

use crate::client::SchedulerClient;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`SchedulerClient`] backed by a generic REST batch-job API: `POST
/// {base_url}/jobs`. The scheduler itself, what actually runs the
/// container, is out of scope; this crate only has to get the job
/// descriptor accepted.
pub struct HttpSchedulerClient {
    http: Client,
    base_url: String,
}

impl HttpSchedulerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(SUBMIT_TIMEOUT)
                .build()
                .expect("reqwest client builder with static config cannot fail"),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitJobRequest<'a> {
    name: &'a str,
    #[serde(rename = "jobType")]
    job_type: &'static str,
    image: &'a str,
    env: HashMap<&'a str, &'a str>,
    namespace: &'a str,
    #[serde(rename = "restartPolicy")]
    restart_policy: &'static str,
    #[serde(rename = "imagePullPolicy")]
    pull_policy: &'static str,
    completions: u32,
}

#[async_trait]
impl SchedulerClient for HttpSchedulerClient {
    async fn submit(&self, descriptor: &JobDescriptor) -> Result<(), SchedulerError> {
        let env = descriptor
            .env
            .iter()
            .map(|var| (var.name.as_str(), var.value.as_str()))
            .collect();
        let body = SubmitJobRequest {
            name: &descriptor.name,
            job_type: descriptor.job_type.label(),
            image: &descriptor.image,
            env,
            namespace: &descriptor.namespace,
            restart_policy: "Never",
            pull_policy: "Always",
            completions: descriptor.completions,
        };

        let response = self
            .http
            .post(format!("{}/jobs", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|err| SchedulerError::Submit(err.into()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(SchedulerError::AlreadyExists {
                name: descriptor.name.clone(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(SchedulerError::Submit(anyhow::anyhow!(
                    "scheduler returned {status}: {body}"
                )))
            }
        }
    }
}
