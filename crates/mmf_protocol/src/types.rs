//! Domain types shared by the state store, scheduler, and orchestrator crates.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A profile identifier as popped from the profile queue: `<matchObjectID>.<profileID>`.
///
/// The Orchestrator never interprets the two halves beyond splitting them; it
/// round-trips the whole string back to the Backend API verbatim as
/// `MMF_ERROR_ID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

/// The two halves of a [`ProfileId`], split on its single `.` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdParts {
    pub match_object_id: String,
    pub profile_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileIdError {
    #[error("profile id {0:?} is not dot-separated into exactly two non-empty halves")]
    Malformed(String),
}

impl ProfileId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits into `(matchObjectID, profileID)`. Exactly one `.` is required;
    /// both halves must be non-empty.
    pub fn split(&self) -> Result<ProfileIdParts, ProfileIdError> {
        let mut parts = self.0.splitn(2, '.');
        let first = parts.next().unwrap_or_default();
        let rest = parts.next();
        match rest {
            Some(rest) if !first.is_empty() && !rest.is_empty() && !rest.contains('.') => {
                Ok(ProfileIdParts {
                    match_object_id: first.to_string(),
                    profile_id: rest.to_string(),
                })
            }
            _ => Err(ProfileIdError::Malformed(self.0.clone())),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProfileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A proposal identifier: `proposal.<timestamp>.<matchObjectID>.<profileID>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn new(timestamp: i64, parts: &ProfileIdParts) -> Self {
        Self(format!(
            "proposal.{}.{}.{}",
            timestamp, parts.match_object_id, parts.profile_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of workload a [`JobDescriptor`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Mmf,
    Evaluator,
}

impl JobType {
    pub fn label(self) -> &'static str {
        match self {
            JobType::Mmf => "mmf",
            JobType::Evaluator => "evaluator",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One job submission sent to the external batch-job scheduler.
///
/// `restart_policy` is always `never`, `pull_policy` is always `always`, and
/// `completions` is always `1` per the spec's job descriptor contract; they
/// are still explicit fields so the scheduler client serializes them rather
/// than assuming scheduler-side defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub name: String,
    pub job_type: JobType,
    pub image: String,
    pub env: Vec<EnvVar>,
    pub namespace: String,
    pub restart_policy: RestartPolicy,
    pub pull_policy: PullPolicy,
    pub completions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum RestartPolicy {
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PullPolicy {
    Always,
}

/// Why the evaluator gate fired this iteration. Carried through to the
/// evaluator dispatch for logging and to pick which `mmforc.evals*` metric
/// counter to tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalReason {
    IntervalExceeded,
    MmfsCompleted,
}

impl EvalReason {
    pub fn label(self) -> &'static str {
        match self {
            EvalReason::IntervalExceeded => "interval_exceeded",
            EvalReason::MmfsCompleted => "mmfs_completed",
        }
    }
}

impl fmt::Display for EvalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_well_formed_profile_id() {
        let id = ProfileId::new("moA.profA");
        let parts = id.split().unwrap();
        assert_eq!(parts.match_object_id, "moA");
        assert_eq!(parts.profile_id, "profA");
    }

    #[test]
    fn rejects_profile_id_without_dot() {
        let id = ProfileId::new("badprofile");
        assert_eq!(
            id.split(),
            Err(ProfileIdError::Malformed("badprofile".to_string()))
        );
    }

    #[test]
    fn rejects_profile_id_with_extra_dot() {
        let id = ProfileId::new("mo.prof.extra");
        assert!(id.split().is_err());
    }

    #[test]
    fn rejects_empty_halves() {
        assert!(ProfileId::new(".prof").split().is_err());
        assert!(ProfileId::new("mo.").split().is_err());
    }

    #[test]
    fn proposal_id_formats_as_expected() {
        let parts = ProfileIdParts {
            match_object_id: "moA".to_string(),
            profile_id: "profA".to_string(),
        };
        let proposal = ProposalId::new(1_700_000_000, &parts);
        assert_eq!(proposal.as_str(), "proposal.1700000000.moA.profA");
    }
}
