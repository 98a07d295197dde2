//! Set difference between formatted messages and the archive's catalog.

use std::collections::HashSet;

use crate::models::message::IngestMessage;

/// Keep the messages whose product is not already in `existing_ids`.
///
/// Input order is preserved. The message list itself is not deduplicated:
/// two jobs producing the same product name both survive.
pub fn unpublished<I, S>(messages: Vec<IngestMessage>, existing_ids: I) -> Vec<IngestMessage>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let existing: HashSet<String> = existing_ids.into_iter().map(Into::into).collect();
    messages
        .into_iter()
        .filter(|m| !existing.contains(&m.product_name))
        .collect()
}
