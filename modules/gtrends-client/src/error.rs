use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrendsError>;

#[derive(Debug, Error)]
pub enum TrendsError {
    /// HTTP 429 from any endpoint. The only retryable condition.
    #[error("rate limit exceeded (429)")]
    RateLimited,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// The explore response carried no widget of the expected kind.
    #[error("missing widget: {0}")]
    MissingWidget(String),
}

impl TrendsError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TrendsError::RateLimited)
    }
}

impl From<reqwest::Error> for TrendsError {
    fn from(err: reqwest::Error) -> Self {
        TrendsError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TrendsError {
    fn from(err: serde_json::Error) -> Self {
        TrendsError::Parse(err.to_string())
    }
}
