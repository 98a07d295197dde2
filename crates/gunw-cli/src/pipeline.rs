//! One reconciliation sweep: HyP3 jobs -> messages -> CMR diff -> SNS.

use eyre::WrapErr;
use gunw_cmr::{CmrClient, SearchQuery};
use gunw_core::IngestMessage;
use gunw_core::reconcile::unpublished;
use gunw_hyp3::{Hyp3Client, JobFilter, find_succeeded_jobs};
use gunw_sns::{PublishReport, TopicPublisher, publish_messages};
use jiff::Timestamp;
use tracing::info;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub job_filter: JobFilter,
    pub search_query: SearchQuery,
    pub topic_arn: String,
    pub response_topic_arn: String,
    pub dry_run: bool,
}

pub async fn run(
    config: &RunConfig,
    hyp3: &[Hyp3Client],
    cmr: &CmrClient,
    publisher: &dyn TopicPublisher,
) -> eyre::Result<PublishReport> {
    let jobs = find_succeeded_jobs(hyp3, &config.job_filter, Timestamp::now())
        .await
        .wrap_err("querying HyP3 for jobs")?;

    let messages = jobs
        .iter()
        .map(|job| IngestMessage::new_now(job, &config.response_topic_arn))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("formatting ingest messages")?;

    let existing = cmr
        .product_ids(&config.search_query)
        .await
        .wrap_err("querying CMR for existing products")?;

    let candidates = messages.len();
    let new_messages = unpublished(messages, existing);
    info!(
        candidates,
        new = new_messages.len(),
        already_ingested = candidates - new_messages.len(),
        "reconciled against CMR"
    );

    let report = publish_messages(publisher, &new_messages, &config.topic_arn, config.dry_run)
        .await
        .wrap_err("publishing ingest messages")?;

    Ok(report)
}
