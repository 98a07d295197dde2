//! The ingest notification sent to the archive for each new product.

use jiff::civil::{DateTime, DateTimeRound};
use jiff::fmt::temporal::DateTimePrinter;
use jiff::tz::TimeZone;
use jiff::{RoundMode, Timestamp, Unit};
use serde::{Deserialize, Serialize, Serializer};

use crate::arn;
use crate::error::CoreError;
use crate::models::job::JobRecord;
use crate::product_keys;

/// A `(bucket, key)` reference to an S3 object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArtifactRef {
    pub bucket: String,
    pub key: String,
}

/// Where the archive should report ingest results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseTopic {
    pub region: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IngestMessage {
    pub product_name: String,
    /// Naive UTC wall-clock time at which the message was built.
    #[serde(serialize_with = "serialize_delivery_time")]
    pub delivery_time: DateTime,
    pub response_topic: ResponseTopic,
    pub browse: ArtifactRef,
    pub metadata: ArtifactRef,
    pub product: ArtifactRef,
}

impl IngestMessage {
    /// Build the message for a job's primary output.
    pub fn from_job(
        job: &JobRecord,
        response_topic_arn: &str,
        delivery_time: DateTime,
    ) -> Result<Self, CoreError> {
        let primary = job.primary_artifact()?;
        let region = arn::region(response_topic_arn)?;
        let key = primary.key.as_str();
        let product_name = product_keys::product_name(key);
        if product_name.is_empty() {
            return Err(CoreError::MissingField(format!("file name in key `{key}`")));
        }

        let artifact = |key: String| ArtifactRef {
            bucket: primary.bucket.clone(),
            key,
        };

        Ok(Self {
            product_name: product_name.to_string(),
            delivery_time,
            response_topic: ResponseTopic {
                region: region.to_string(),
                arn: response_topic_arn.to_string(),
            },
            browse: artifact(product_keys::browse(key)),
            metadata: artifact(product_keys::metadata(key)),
            product: artifact(key.to_string()),
        })
    }

    /// Like [`IngestMessage::from_job`], stamped with the current time.
    pub fn new_now(job: &JobRecord, response_topic_arn: &str) -> Result<Self, CoreError> {
        Self::from_job(job, response_topic_arn, delivery_time_now()?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Current UTC time without an offset, truncated to microseconds.
pub fn delivery_time_now() -> Result<DateTime, CoreError> {
    let now = Timestamp::now().to_zoned(TimeZone::UTC).datetime();
    let truncated = now.round(
        DateTimeRound::new()
            .smallest(Unit::Microsecond)
            .mode(RoundMode::Trunc),
    )?;
    Ok(truncated)
}

/// Either whole seconds or exactly six fractional digits, never a trimmed
/// fraction: `2024-06-14T12:30:00` or `2024-06-14T12:30:00.120000`.
pub fn format_delivery_time(dt: &DateTime) -> String {
    let precision = if dt.subsec_nanosecond() == 0 { 0 } else { 6 };
    DateTimePrinter::new()
        .precision(Some(precision))
        .datetime_to_string(dt)
}

fn serialize_delivery_time<S: Serializer>(dt: &DateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_delivery_time(dt))
}
