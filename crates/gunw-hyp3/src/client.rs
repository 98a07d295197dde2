use std::fmt;
use std::time::Duration;

use backon::ExponentialBuilder;
use gunw_core::retry::RetryPolicy;
use reqwest::{Client, Url};
use tracing::info;

use crate::error::Hyp3Error;

pub const DEFAULT_HYP3_URL: &str = "https://hyp3-api.asf.alaska.edu";

/// Earthdata Login OAuth entry point used by ASF services.
pub const EARTHDATA_AUTH_URL: &str = "https://urs.earthdata.nasa.gov/oauth/authorize?response_type=code&client_id=BO_n7nTIlMljdvU6kRRB3g&redirect_uri=https://auth.asf.alaska.edu/login&app_type=401";

#[derive(Clone)]
pub struct EarthdataCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for EarthdataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EarthdataCredentials")
            .field("username", &self.username)
            .field("password", &"****")
            .finish()
    }
}

/// An authenticated session against one HyP3 deployment.
#[derive(Debug, Clone)]
pub struct Hyp3Client {
    pub(crate) api_url: Url,
    pub(crate) http: Client,
    pub(crate) backoff: ExponentialBuilder,
}

impl Hyp3Client {
    /// Log in through Earthdata and keep the resulting session cookies.
    ///
    /// The auth URL redirects through the ASF auth service, which sets the
    /// cookie the HyP3 API accepts.
    pub async fn login(
        api_url: &str,
        auth_url: &str,
        credentials: &EarthdataCredentials,
        retry: RetryPolicy,
    ) -> Result<Self, Hyp3Error> {
        let api_url = Url::parse(api_url).map_err(|_| Hyp3Error::InvalidUrl(api_url.to_string()))?;
        let auth_url =
            Url::parse(auth_url).map_err(|_| Hyp3Error::InvalidUrl(auth_url.to_string()))?;

        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(60))
            .user_agent(concat!("gunw-hyp3/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Hyp3Error::request("build_client", e))?;

        let response = http
            .get(auth_url)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .send()
            .await
            .map_err(|e| Hyp3Error::request("login", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Hyp3Error::Authentication {
                username: credentials.username.clone(),
                status: status.as_u16(),
            });
        }

        info!(api = %api_url, username = %credentials.username, "authenticated with Earthdata Login");

        Ok(Self {
            api_url,
            http,
            backoff: retry.backoff(),
        })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}
