use clap::{ArgAction, Parser, ValueEnum};
use gunw_cmr::client::DEFAULT_CMR_DOMAIN;
use gunw_cmr::search::{DEFAULT_PAGE_SIZE, DEFAULT_PROVIDER};
use gunw_cmr::{Collection, IdentifierField, SearchQuery};
use gunw_core::retry::RetryPolicy;
use gunw_hyp3::client::{DEFAULT_HYP3_URL, EARTHDATA_AUTH_URL};
use gunw_hyp3::{EarthdataCredentials, JobFilter};
use gunw_sns::AwsCredentialSource;
use jiff::Timestamp;

use crate::pipeline::RunConfig;

pub const DEFAULT_COLLECTION_CONCEPT_ID: &str = "C1595422627-ASF";
pub const DEFAULT_JOB_TYPE: &str = "INSAR_ISCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdentifierArg {
    ProducerGranuleId,
    Title,
}

impl From<IdentifierArg> for IdentifierField {
    fn from(value: IdentifierArg) -> Self {
        match value {
            IdentifierArg::ProducerGranuleId => IdentifierField::ProducerGranuleId,
            IdentifierArg::Title => IdentifierField::Title,
        }
    }
}

/// Publish new HyP3 GUNW products to the archive's ingest topic.
///
/// Finds succeeded HyP3 jobs, skips products CMR already has, and sends
/// one ingest message per remaining product.
#[derive(Debug, Parser)]
#[command(name = "publish-gunw", version, about)]
pub struct Cli {
    /// SNS topic that receives ingest messages.
    pub topic_arn: String,

    /// SNS topic the archive reports ingest results to.
    pub response_topic_arn: String,

    /// Earthdata Login username.
    #[arg(env = "EARTHDATA_USERNAME")]
    pub username: String,

    /// Earthdata Login password.
    #[arg(env = "EARTHDATA_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// CMR deployment to check for existing products.
    #[arg(long, default_value = DEFAULT_CMR_DOMAIN)]
    pub cmr_domain: String,

    /// CMR data provider.
    #[arg(long, default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// CMR collection concept id (default when no short name is given).
    #[arg(long, conflicts_with = "short_name")]
    pub collection_concept_id: Option<String>,

    /// CMR collection short name.
    #[arg(long)]
    pub short_name: Option<String>,

    /// Feed entry field holding the product name.
    #[arg(long, value_enum, default_value_t = IdentifierArg::ProducerGranuleId)]
    pub identifier_field: IdentifierArg,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// HyP3 API to query. Repeat for several deployments.
    #[arg(long = "hyp3-url", default_value = DEFAULT_HYP3_URL)]
    pub hyp3_urls: Vec<String>,

    /// Job type to query. Repeat for several types.
    #[arg(long = "job-type", default_value = DEFAULT_JOB_TYPE)]
    pub job_types: Vec<String>,

    /// Only jobs with this name. Repeat for several names.
    #[arg(long = "name")]
    pub names: Vec<String>,

    /// Only jobs submitted at or after this time (RFC 3339, offset required).
    #[arg(long, value_parser = parse_timestamp)]
    pub start: Option<Timestamp>,

    /// Only jobs submitted at or before this time (RFC 3339, offset required).
    #[arg(long, value_parser = parse_timestamp)]
    pub end: Option<Timestamp>,

    /// Earthdata Login authorize URL.
    #[arg(long, default_value = EARTHDATA_AUTH_URL)]
    pub auth_url: String,

    /// AWS profile for SNS. Uses the default credential chain if omitted.
    #[arg(long, env = "AWS_PROFILE")]
    pub aws_profile: Option<String>,

    /// Attempts per HyP3/CMR request (1 disables retries).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub http_max_attempts: u32,

    /// Attempts per SNS publish call.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub sns_max_attempts: u32,

    /// Log what would be published without publishing.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

/// Parse a timestamp that carries an explicit offset.
///
/// Timezone-naive input like `2022-05-11T00:00:00` is rejected.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    value.parse::<Timestamp>().map_err(|e| {
        format!("`{value}` is not a timezone-aware RFC 3339 timestamp (e.g. 2022-05-11T00:00:00Z): {e}")
    })
}

impl Cli {
    pub fn collection(&self) -> Collection {
        match (&self.short_name, &self.collection_concept_id) {
            (Some(short_name), _) => Collection::ShortName(short_name.clone()),
            (None, Some(id)) => Collection::ConceptId(id.clone()),
            (None, None) => Collection::ConceptId(DEFAULT_COLLECTION_CONCEPT_ID.to_string()),
        }
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            provider: self.provider.clone(),
            collection: self.collection(),
            identifier: self.identifier_field.into(),
            page_size: self.page_size,
        }
    }

    pub fn job_filter(&self) -> JobFilter {
        JobFilter {
            job_types: self.job_types.clone(),
            names: self.names.clone(),
            start: self.start,
            end: self.end,
        }
    }

    pub fn credentials(&self) -> EarthdataCredentials {
        EarthdataCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn aws_credentials(&self) -> AwsCredentialSource {
        match &self.aws_profile {
            Some(profile_name) => AwsCredentialSource::Profile {
                profile_name: profile_name.clone(),
            },
            None => AwsCredentialSource::DefaultChain,
        }
    }

    pub fn http_retry(&self) -> RetryPolicy {
        RetryPolicy::none().with_max_attempts(self.http_max_attempts)
    }

    pub fn sns_retry(&self) -> RetryPolicy {
        RetryPolicy::none().with_max_attempts(self.sns_max_attempts)
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            job_filter: self.job_filter(),
            search_query: self.search_query(),
            topic_arn: self.topic_arn.clone(),
            response_topic_arn: self.response_topic_arn.clone(),
            dry_run: self.dry_run,
        }
    }
}
