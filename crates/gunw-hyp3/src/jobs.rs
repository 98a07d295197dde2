use std::time::Duration;

use backon::Retryable;
use gunw_core::{JobRecord, JobStatus};
use jiff::Timestamp;
use reqwest::Url;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::Hyp3Client;
use crate::error::Hyp3Error;

const JOBS_PATH: &str = "/jobs";

/// One `/jobs` search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuery {
    pub status: JobStatus,
    pub job_type: String,
    pub name: Option<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

/// What to look for across every endpoint.
///
/// Each job type is queried separately, and when names are given, each
/// name is queried separately too.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub job_types: Vec<String>,
    pub names: Vec<String>,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl JobFilter {
    pub fn queries(&self) -> Vec<JobQuery> {
        let names: Vec<Option<String>> = if self.names.is_empty() {
            vec![None]
        } else {
            self.names.iter().cloned().map(Some).collect()
        };

        self.job_types
            .iter()
            .flat_map(|job_type| {
                names.iter().map(move |name| JobQuery {
                    status: JobStatus::Succeeded,
                    job_type: job_type.clone(),
                    name: name.clone(),
                    start: self.start,
                    end: self.end,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct JobsPage {
    #[serde(default)]
    jobs: Vec<JobRecord>,
    #[serde(default)]
    next: Option<String>,
}

impl Hyp3Client {
    /// All jobs matching `query`, following `next` links to the end.
    pub async fn find_jobs(&self, query: &JobQuery) -> Result<Vec<JobRecord>, Hyp3Error> {
        let mut url = self.jobs_url(query)?;
        let mut jobs = Vec::new();

        loop {
            let page = self.fetch_page(&url).await?;
            debug!(url = %url, jobs = page.jobs.len(), "fetched HyP3 page");
            jobs.extend(page.jobs);

            match page.next {
                Some(next) => {
                    url = self
                        .api_url
                        .join(&next)
                        .map_err(|_| Hyp3Error::InvalidUrl(next.clone()))?;
                }
                None => break,
            }
        }

        Ok(jobs)
    }

    fn jobs_url(&self, query: &JobQuery) -> Result<Url, Hyp3Error> {
        let mut url = self
            .api_url
            .join(JOBS_PATH)
            .map_err(|_| Hyp3Error::InvalidUrl(self.api_url.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("status_code", query.status.as_str());
            pairs.append_pair("job_type", &query.job_type);
            if let Some(name) = &query.name {
                pairs.append_pair("name", name);
            }
            if let Some(start) = query.start {
                pairs.append_pair("start", &start.to_string());
            }
            if let Some(end) = query.end {
                pairs.append_pair("end", &end.to_string());
            }
        }

        Ok(url)
    }

    async fn fetch_page(&self, url: &Url) -> Result<JobsPage, Hyp3Error> {
        let stage = "find_jobs";

        let attempt = move || async move {
            let response = self
                .http
                .get(url.clone())
                .send()
                .await
                .map_err(|e| Hyp3Error::request(stage, e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Hyp3Error::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                    body,
                });
            }

            response.json::<JobsPage>().await.map_err(Hyp3Error::Decode)
        };

        attempt
            .retry(self.backoff.clone())
            .sleep(sleep)
            .when(Hyp3Error::is_retryable)
            .notify(|err: &Hyp3Error, delay: Duration| {
                warn!(
                    stage,
                    delay_ms = delay.as_millis(),
                    error = %err,
                    "retrying HyP3 request"
                );
            })
            .await
    }
}

/// Succeeded, unexpired jobs across every endpoint.
///
/// Endpoints are queried one after another, in order; the first failure
/// aborts the whole search.
pub async fn find_succeeded_jobs(
    clients: &[Hyp3Client],
    filter: &JobFilter,
    now: Timestamp,
) -> Result<Vec<JobRecord>, Hyp3Error> {
    let queries = filter.queries();
    let mut jobs = Vec::new();

    for client in clients {
        for query in &queries {
            info!(
                api = %client.api_url(),
                job_type = %query.job_type,
                name = query.name.as_deref().unwrap_or("*"),
                "querying HyP3 for GUNW jobs"
            );
            let found = client.find_jobs(query).await?;
            info!(
                api = %client.api_url(),
                job_type = %query.job_type,
                name = query.name.as_deref().unwrap_or("*"),
                count = found.len(),
                "found jobs"
            );
            jobs.extend(found);
        }
    }

    let total = jobs.len();
    let kept: Vec<JobRecord> = jobs
        .into_iter()
        .filter(|job| job.succeeded())
        .filter(|job| !job.is_expired_at(now))
        .collect();

    info!(total, kept = kept.len(), "filtered to succeeded, unexpired jobs");
    Ok(kept)
}
