use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("transaction feed unreachable: {0}")]
    Unreachable(String),

    #[error("transaction feed request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from transaction feed: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FeedError::Unreachable(format!("request timed out: {e}"))
        } else if e.is_connect() {
            FeedError::Unreachable(format!("connection failed: {e}"))
        } else if e.is_decode() {
            FeedError::InvalidResponse(e.to_string())
        } else {
            FeedError::RequestFailed(e.to_string())
        }
    }
}
