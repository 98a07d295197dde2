//! Paginated granule search.
//!
//! CMR pages with a `CMR-Search-After` response header. The value is echoed
//! back on the next request; a response without it is the last page.

use std::time::Duration;

use backon::Retryable;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::CmrClient;
use crate::error::CmrError;

pub const SEARCH_AFTER_HEADER: &str = "CMR-Search-After";
pub const DEFAULT_PROVIDER: &str = "ASF";
pub const DEFAULT_PAGE_SIZE: u32 = 2000;
const GRANULE_SEARCH_PATH: &str = "/search/granules.json";

/// Which collection to search, by concept id or short name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    ConceptId(String),
    ShortName(String),
}

impl Collection {
    fn query_param(&self) -> (&'static str, &str) {
        match self {
            Collection::ConceptId(id) => ("collection_concept_id", id),
            Collection::ShortName(name) => ("short_name", name),
        }
    }
}

/// The feed entry field that carries the product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierField {
    #[default]
    ProducerGranuleId,
    Title,
}

impl IdentifierField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierField::ProducerGranuleId => "producer_granule_id",
            IdentifierField::Title => "title",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub provider: String,
    pub collection: Collection,
    pub identifier: IdentifierField,
    pub page_size: u32,
}

impl SearchQuery {
    pub fn new(collection: Collection) -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            collection,
            identifier: IdentifierField::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GranuleResponse {
    feed: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(default)]
    entry: Vec<Map<String, Value>>,
}

struct Page {
    ids: Vec<String>,
    search_after: Option<String>,
}

impl CmrClient {
    /// Every matching granule's identifier, across all pages.
    pub async fn product_ids(&self, query: &SearchQuery) -> Result<Vec<String>, CmrError> {
        let url = self
            .domain
            .join(GRANULE_SEARCH_PATH)
            .map_err(|_| CmrError::InvalidDomain(self.domain.to_string()))?;

        let (_, collection) = query.collection.query_param();
        info!(domain = %self.domain, collection, "querying CMR for GUNW products");

        let mut ids = Vec::new();
        let mut search_after: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            let result = self.fetch_page(&url, query, search_after.as_deref()).await?;
            debug!(page, entries = result.ids.len(), "fetched CMR page");
            ids.extend(result.ids);

            match result.search_after {
                Some(token) => search_after = Some(token),
                None => break,
            }
        }

        info!(count = ids.len(), pages = page, "found products in CMR");
        Ok(ids)
    }

    async fn fetch_page(
        &self,
        url: &Url,
        query: &SearchQuery,
        search_after: Option<&str>,
    ) -> Result<Page, CmrError> {
        let stage = "search_granules";

        let attempt = move || async move {
            let (param, value) = query.collection.query_param();
            let mut req = self
                .http
                .get(url.clone())
                .query(&[("provider", query.provider.as_str()), (param, value)])
                .query(&[("page_size", query.page_size)]);

            if let Some(token) = search_after {
                req = req.header(SEARCH_AFTER_HEADER, token);
            }

            let response = req
                .send()
                .await
                .map_err(|e| CmrError::request(stage, e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CmrError::HttpStatus {
                    status: status.as_u16(),
                    body,
                });
            }

            let next = match response.headers().get(SEARCH_AFTER_HEADER) {
                Some(value) => Some(
                    value
                        .to_str()
                        .map_err(|_| CmrError::InvalidHeader {
                            header: SEARCH_AFTER_HEADER,
                        })?
                        .to_string(),
                ),
                None => None,
            };

            let body: GranuleResponse = response.json().await.map_err(CmrError::Decode)?;
            let ids = body
                .feed
                .entry
                .iter()
                .map(|entry| identifier(entry, query.identifier))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Page {
                ids,
                search_after: next,
            })
        };

        attempt
            .retry(self.backoff.clone())
            .sleep(sleep)
            .when(CmrError::is_retryable)
            .notify(|err: &CmrError, delay: Duration| {
                warn!(
                    stage,
                    delay_ms = delay.as_millis(),
                    error = %err,
                    "retrying CMR search request"
                );
            })
            .await
    }
}

fn identifier(entry: &Map<String, Value>, field: IdentifierField) -> Result<String, CmrError> {
    entry
        .get(field.as_str())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(CmrError::MissingIdentifier {
            field: field.as_str(),
        })
}
