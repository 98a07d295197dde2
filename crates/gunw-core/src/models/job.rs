use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a HyP3 job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Value of the `status_code` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Object {
    pub bucket: String,
    pub key: String,
}

/// One output file of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub s3: Option<S3Object>,
}

/// A job as returned by the HyP3 `/jobs` endpoint.
///
/// Only the fields the ingest sweep reads are modelled; anything else in
/// the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub job_type: String,
    pub status_code: JobStatus,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub request_time: Option<Timestamp>,
    #[serde(default)]
    pub expiration_time: Option<Timestamp>,
    #[serde(default)]
    pub files: Vec<JobFile>,
}

impl JobRecord {
    pub fn succeeded(&self) -> bool {
        self.status_code == JobStatus::Succeeded
    }

    /// Whether the job's outputs have passed their retention window at `now`.
    /// Jobs without an expiration time never expire.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiration_time.is_some_and(|expires| now >= expires)
    }

    /// The primary product object, `files[0].s3`.
    pub fn primary_artifact(&self) -> Result<&S3Object, CoreError> {
        self.files
            .first()
            .and_then(|f| f.s3.as_ref())
            .ok_or_else(|| {
                CoreError::MissingField(format!("files[0].s3 (job {})", self.job_id))
            })
    }
}
