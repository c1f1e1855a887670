//! Nested configuration tree, loaded with the `config` crate from a layered
//! file + environment source the way the original's Viper setup did.

use serde::Deserialize;

use crate::defaults;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileQueueConfig {
    #[serde(default = "defaults_profile_queue_name")]
    pub name: String,
    #[serde(default = "defaults_profile_pull_count")]
    pub pull_count: i64,
}

impl Default for ProfileQueueConfig {
    fn default() -> Self {
        Self {
            name: defaults_profile_queue_name(),
            pull_count: defaults_profile_pull_count(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProposalQueueConfig {
    #[serde(default = "defaults_proposal_queue_name")]
    pub name: String,
}

impl Default for ProposalQueueConfig {
    fn default() -> Self {
        Self {
            name: defaults_proposal_queue_name(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct QueuesConfig {
    #[serde(default)]
    pub profiles: ProfileQueueConfig,
    #[serde(default)]
    pub proposals: ProposalQueueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(default = "defaults_evaluator_interval")]
    pub interval: i64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            interval: defaults_evaluator_interval(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultImagesConfig {
    #[serde(default = "defaults_mmf_image")]
    pub mmf: ImageRef,
    #[serde(default = "defaults_evaluator_image")]
    pub evaluator: ImageRef,
}

impl Default for DefaultImagesConfig {
    fn default() -> Self {
        Self {
            mmf: defaults_mmf_image(),
            evaluator: defaults_evaluator_image(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonKeysConfig {
    #[serde(default = "defaults_mmf_image_json_key")]
    pub mmf_image: String,
}

impl Default for JsonKeysConfig {
    fn default() -> Self {
        Self {
            mmf_image: defaults_mmf_image_json_key(),
        }
    }
}

/// The full configuration tree consumed by the control loop and dispatchers,
/// mirroring the original's `queues.*` / `evaluator.*` / `defaultImages.*` /
/// `jsonkeys.*` / `debug` key tree one-to-one.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OrchestratorConfig {
    #[serde(default)]
    pub queues: QueuesConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default, rename = "defaultImages")]
    pub default_images: DefaultImagesConfig,
    #[serde(default, rename = "jsonkeys")]
    pub json_keys: JsonKeysConfig,
    #[serde(default)]
    pub debug: bool,
    /// State store connection string. Not present in the original's sample
    /// config because it lived in a separate Redis pool constructor; folded
    /// in here since this crate's `config` loader is the single source of
    /// truth for everything process startup needs.
    #[serde(default = "defaults_state_store_url")]
    pub state_store_url: String,
    /// Scheduler base URL for the HTTP batch-job API.
    #[serde(default = "defaults_scheduler_url")]
    pub scheduler_url: String,
}

fn defaults_profile_queue_name() -> String {
    defaults::DEFAULT_PROFILE_QUEUE_NAME.to_string()
}

fn defaults_profile_pull_count() -> i64 {
    defaults::DEFAULT_PROFILE_PULL_COUNT
}

fn defaults_proposal_queue_name() -> String {
    defaults::DEFAULT_PROPOSAL_QUEUE_NAME.to_string()
}

fn defaults_evaluator_interval() -> i64 {
    defaults::DEFAULT_EVALUATOR_INTERVAL_SECS
}

fn defaults_mmf_image() -> ImageRef {
    ImageRef {
        name: defaults::DEFAULT_MMF_IMAGE_NAME.to_string(),
        tag: defaults::DEFAULT_MMF_IMAGE_TAG.to_string(),
    }
}

fn defaults_evaluator_image() -> ImageRef {
    ImageRef {
        name: defaults::DEFAULT_EVALUATOR_IMAGE_NAME.to_string(),
        tag: defaults::DEFAULT_EVALUATOR_IMAGE_TAG.to_string(),
    }
}

fn defaults_mmf_image_json_key() -> String {
    defaults::DEFAULT_MMF_IMAGE_JSON_KEY.to_string()
}

fn defaults_state_store_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn defaults_scheduler_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

/// Loads configuration from an optional file plus `MMFORC__`-prefixed
/// environment overrides, the way this repo's nested-config binaries do.
/// Invalid or missing config is logged by the caller and the process
/// proceeds with defaults, matching the original's "logs and proceeds"
/// policy. This function itself only fails on a malformed file that
/// exists but cannot be parsed at all.
pub fn load_config(path: Option<&str>) -> Result<OrchestratorConfig, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(false));
    } else {
        builder = builder.add_source(config::File::with_name("mmforc").required(false));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("MMFORC")
            .separator("__")
            .try_parsing(true),
    );
    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_key() {
        let cfg = OrchestratorConfig::default();
        assert_eq!(cfg.queues.profiles.name, "profileq");
        assert_eq!(cfg.queues.profiles.pull_count, 10);
        assert_eq!(cfg.queues.proposals.name, "proposalq");
        assert_eq!(cfg.evaluator.interval, 60);
        assert_eq!(cfg.default_images.mmf.reference(), "mmf:latest");
        assert_eq!(cfg.default_images.evaluator.reference(), "evaluator:latest");
        assert_eq!(cfg.json_keys.mmf_image, "image");
        assert!(!cfg.debug);
    }

    #[test]
    fn load_config_without_file_falls_back_to_defaults() {
        let cfg = load_config(Some("/nonexistent/path/does-not-exist")).unwrap();
        assert_eq!(cfg.queues.profiles.name, "profileq");
    }
}
