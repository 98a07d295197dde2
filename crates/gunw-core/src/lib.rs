//! gunw-core
//!
//! Pure domain types for the GUNW ingest sweep: HyP3 job records, the
//! ingest notification message, product key conventions, the
//! reconciliation filter, and the retry policy shared by the HTTP clients.
//! No network dependency.

pub mod arn;
pub mod error;
pub mod models;
pub mod product_keys;
pub mod reconcile;
pub mod retry;

pub use crate::error::CoreError;
pub use crate::models::job::{JobFile, JobRecord, JobStatus, S3Object};
pub use crate::models::message::{ArtifactRef, IngestMessage, ResponseTopic};
