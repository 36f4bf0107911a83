//! Twitter Error Types
//!
//! Structured classification of post/delete failures. Classification is
//! derived from the HTTP status first, with message-substring matching only
//! as a fallback for errors that arrive without a usable status.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwitterError {
    /// HTTP 429 or a rate-limit message; retryable with backoff
    #[error("Rate limited")]
    RateLimited,

    /// HTTP 403 or duplicate-content rejection; not retryable
    #[error("Duplicate tweet or permission issue")]
    DuplicateOrPermission,

    /// Transport-level failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(String),

    /// API rejected the request with some other status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl TwitterError {
    /// Map a response status and body onto an error kind.
    pub fn classify(status: Option<u16>, message: &str) -> Self {
        match status {
            Some(429) => return TwitterError::RateLimited,
            Some(403) => return TwitterError::DuplicateOrPermission,
            _ => {}
        }

        let lowered = message.to_lowercase();
        if lowered.contains("rate limit") {
            return TwitterError::RateLimited;
        }
        if lowered.contains("duplicate") {
            return TwitterError::DuplicateOrPermission;
        }

        match status {
            Some(status) => TwitterError::Api {
                status,
                message: message.to_string(),
            },
            None => TwitterError::Http(message.to_string()),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, TwitterError::RateLimited)
    }

    /// Permanent rejections that must not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(self, TwitterError::DuplicateOrPermission)
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        TwitterError::Http(err.to_string())
    }
}
