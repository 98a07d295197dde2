use aws_config::retry::RetryConfig;
use aws_sdk_sns::Client;
use gunw_core::arn;
use gunw_core::retry::RetryPolicy;

use crate::error::{SnsError, format_err_chain};
use crate::publish::{BoxFuture, TopicPublisher};

/// Where AWS credentials come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AwsCredentialSource {
    Profile {
        profile_name: String,
    },
    #[default]
    DefaultChain,
}

/// Build an `SdkConfig` for the region embedded in `topic_arn`.
pub async fn build_aws_config(
    topic_arn: &str,
    creds: &AwsCredentialSource,
    retry: RetryPolicy,
) -> Result<aws_config::SdkConfig, SnsError> {
    let region = arn::region(topic_arn)?;

    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .retry_config(
            RetryConfig::standard()
                .with_max_attempts(retry.max_attempts.max(1))
                .with_initial_backoff(retry.min_delay)
                .with_max_backoff(retry.max_delay),
        );

    if let AwsCredentialSource::Profile { profile_name } = creds {
        builder = builder.profile_name(profile_name);
    }

    Ok(builder.load().await)
}

/// Publishes to SNS, one `Publish` call per message.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a publisher whose client region matches the topic.
    pub async fn for_topic(
        topic_arn: &str,
        creds: &AwsCredentialSource,
        retry: RetryPolicy,
    ) -> Result<Self, SnsError> {
        let config = build_aws_config(topic_arn, creds, retry).await?;
        Ok(Self::new(Client::new(&config)))
    }
}

impl TopicPublisher for SnsPublisher {
    fn publish<'a>(
        &'a self,
        topic_arn: &'a str,
        message: String,
    ) -> BoxFuture<'a, Result<Option<String>, SnsError>> {
        Box::pin(async move {
            let resp = self
                .client
                .publish()
                .topic_arn(topic_arn)
                .message(message)
                .send()
                .await
                .map_err(|e| SnsError::Publish(format_err_chain(&e)))?;

            Ok(resp.message_id().map(|s| s.to_string()))
        })
    }
}
