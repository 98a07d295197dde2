//! gunw-sns
//!
//! Publishes ingest messages to an SNS topic. Thin wrapper around the AWS
//! SNS SDK with a dry-run mode.

pub mod client;
pub mod error;
pub mod publish;

pub use crate::client::{AwsCredentialSource, SnsPublisher};
pub use crate::error::SnsError;
pub use crate::publish::{PublishReport, TopicPublisher, publish_messages};
