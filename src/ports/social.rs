//! Social platform port - create and delete status updates.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SocialCredential;

/// A successfully created status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedTweet {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// Duplicate content or permission denial, not retryable
    #[error("Duplicate tweet or permission issue")]
    DuplicateOrPermission,
    /// All attempts consumed by rate limiting
    #[error("Max retries exceeded")]
    MaxRetriesExceeded,
    #[error("Post failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("Max retries exceeded")]
    MaxRetriesExceeded,
    #[error("Delete failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait SocialPort: Send + Sync {
    async fn post(
        &self,
        credential: &SocialCredential,
        text: &str,
    ) -> Result<PostedTweet, PostError>;

    async fn delete(
        &self,
        credential: &SocialCredential,
        tweet_id: &str,
    ) -> Result<(), DeleteError>;
}
