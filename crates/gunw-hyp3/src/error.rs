use thiserror::Error;

#[derive(Debug, Error)]
pub enum Hyp3Error {
    #[error("invalid URL `{0}`")]
    InvalidUrl(String),

    #[error("Earthdata Login failed for {username} (HTTP {status})")]
    Authentication { username: String, status: u16 },

    #[error("request error during `{stage}`: {source}")]
    Request {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("HyP3 returned HTTP {status} for {url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode HyP3 response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl Hyp3Error {
    pub(crate) fn request(stage: &'static str, source: reqwest::Error) -> Self {
        Self::Request { stage, source }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source, .. } => source.is_timeout() || source.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
