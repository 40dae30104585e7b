use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeedError {
    #[error("invalid feed url: {0}")]
    InvalidUrl(String),
    #[error("feed request failed: {0}")]
    Request(String),
    #[error("feed request timed out after {0}s")]
    Timeout(u64),
    #[error("feed responded with status {0}")]
    Status(u16),
    #[error("failed to parse feed: {0}")]
    Parse(String),
}

impl FeedError {
    /// Whether a manual retry has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request(_) | FeedError::Timeout(_) => true,
            FeedError::Status(code) => *code >= 500 || *code == 429,
            FeedError::InvalidUrl(_) | FeedError::Parse(_) => false,
        }
    }
}
