use std::time::Duration;

use backon::ExponentialBuilder;
use gunw_core::retry::RetryPolicy;
use reqwest::{Client, Url};

use crate::error::CmrError;

pub const DEFAULT_CMR_DOMAIN: &str = "https://cmr.earthdata.nasa.gov";
pub const UAT_CMR_DOMAIN: &str = "https://cmr.uat.earthdata.nasa.gov";

/// Short-lived CMR search session.
#[derive(Debug, Clone)]
pub struct CmrClient {
    pub(crate) domain: Url,
    pub(crate) http: Client,
    pub(crate) backoff: ExponentialBuilder,
}

impl CmrClient {
    pub fn new(domain: &str, retry: RetryPolicy) -> Result<Self, CmrError> {
        let domain = Url::parse(domain).map_err(|_| CmrError::InvalidDomain(domain.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("gunw-cmr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CmrError::request("build_client", e))?;

        Ok(Self {
            domain,
            http,
            backoff: retry.backoff(),
        })
    }

    pub fn domain(&self) -> &Url {
        &self.domain
    }
}
