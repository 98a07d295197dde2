use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmrError {
    #[error("invalid CMR domain `{0}`")]
    InvalidDomain(String),

    #[error("request error during `{stage}`: {source}")]
    Request {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("CMR returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("failed to decode CMR response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("CMR entry has no `{field}` field")]
    MissingIdentifier { field: &'static str },

    #[error("invalid {header} header value")]
    InvalidHeader { header: &'static str },
}

impl CmrError {
    pub(crate) fn request(stage: &'static str, source: reqwest::Error) -> Self {
        Self::Request { stage, source }
    }

    /// Transport hiccups and server-side failures are worth another try;
    /// everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { source, .. } => source.is_timeout() || source.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
