use gunw_core::retry::RetryPolicy;
use gunw_sns::client::build_aws_config;
use gunw_sns::{AwsCredentialSource, SnsError};

#[tokio::test]
async fn client_region_comes_from_topic_arn() {
    let config = build_aws_config(
        "arn:aws:sns:us-west-2:123456789012:ingest",
        &AwsCredentialSource::DefaultChain,
        RetryPolicy::none().with_max_attempts(4),
    )
    .await
    .unwrap();

    assert_eq!(config.region().map(|r| r.as_ref()), Some("us-west-2"));
    assert_eq!(
        config.retry_config().map(|r| r.max_attempts()),
        Some(4)
    );
}

#[tokio::test]
async fn topic_without_region_is_rejected() {
    let err = build_aws_config(
        "ingest-topic",
        &AwsCredentialSource::DefaultChain,
        RetryPolicy::none(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SnsError::Core(_)));
}
