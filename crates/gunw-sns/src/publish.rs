use std::future::Future;
use std::pin::Pin;

use gunw_core::IngestMessage;
use tracing::{debug, info};

use crate::error::SnsError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Sends one message to a topic.
///
/// Returns the service-assigned message id when there is one. Methods
/// return boxed futures for dyn compatibility.
pub trait TopicPublisher: Send + Sync {
    fn publish<'a>(
        &'a self,
        topic_arn: &'a str,
        message: String,
    ) -> BoxFuture<'a, Result<Option<String>, SnsError>>;
}

/// Products that were published, or would have been in a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub topic_arn: String,
    pub dry_run: bool,
    pub products: Vec<String>,
}

/// Publish each message to `topic_arn`, in order, one call per message.
///
/// In a dry run nothing is sent but every product is still logged and
/// reported. The first failed publish aborts the rest.
pub async fn publish_messages(
    publisher: &dyn TopicPublisher,
    messages: &[IngestMessage],
    topic_arn: &str,
    dry_run: bool,
) -> Result<PublishReport, SnsError> {
    info!(count = messages.len(), topic_arn, dry_run, "publishing products");

    let mut products = Vec::with_capacity(messages.len());
    for message in messages {
        info!(product = %message.product_name, dry_run, "publishing");
        if !dry_run {
            let message_id = publisher.publish(topic_arn, message.to_json()?).await?;
            debug!(product = %message.product_name, message_id = ?message_id, "published");
        }
        products.push(message.product_name.clone());
    }

    Ok(PublishReport {
        topic_arn: topic_arn.to_string(),
        dry_run,
        products,
    })
}
