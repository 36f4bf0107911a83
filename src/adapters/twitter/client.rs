//! Twitter API Client
//!
//! Creates and deletes status updates through the v2 API with OAuth 1.0a
//! user-context signing. Both operations run a bounded retry loop with
//! rate-limit-aware backoff; the policy lives in free functions so it can be
//! exercised with scripted attempt closures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::error::TwitterError;
use super::oauth;
use crate::domain::SocialCredential;
use crate::ports::clock::Sleeper;
use crate::ports::social::{DeleteError, PostError, PostedTweet, SocialPort};

/// Longest single backoff the retry loop will take.
const BACKOFF_CAP: Duration = Duration::from_secs(300);

/// Twitter API client configuration
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    /// Base URL for the v2 API
    pub api_base_url: String,
    /// Attempt cap per operation, first try included
    pub max_attempts: u32,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.twitter.com/2".to_string(),
            max_attempts: 3,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Twitter v2 client scoped to no particular credential; the credential set
/// to sign with is passed per call, so one client serves every account.
#[derive(Clone)]
pub struct TwitterClient {
    config: TwitterConfig,
    http: Client,
    sleeper: Arc<dyn Sleeper>,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

impl TwitterClient {
    pub fn new(sleeper: Arc<dyn Sleeper>) -> Result<Self, TwitterError> {
        Self::with_config(TwitterConfig::default(), sleeper)
    }

    pub fn with_config(
        config: TwitterConfig,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, TwitterError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TwitterError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            sleeper,
        })
    }

    async fn send_post(
        &self,
        credential: &SocialCredential,
        text: &str,
    ) -> Result<PostedTweet, TwitterError> {
        let url = format!("{}/tweets", self.config.api_base_url);
        let header = oauth::authorization_header(
            "POST",
            &url,
            credential,
            &oauth::nonce(),
            Utc::now().timestamp() as u64,
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: CreateTweetResponse = response
                .json()
                .await
                .map_err(|e| TwitterError::Parse(e.to_string()))?;
            let id = body.data.id;
            let tweet_url = format!("https://x.com/i/web/status/{id}");
            Ok(PostedTweet { id, url: tweet_url })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TwitterError::classify(Some(status.as_u16()), &message))
        }
    }

    async fn send_delete(
        &self,
        credential: &SocialCredential,
        tweet_id: &str,
    ) -> Result<(), TwitterError> {
        let url = format!("{}/tweets/{}", self.config.api_base_url, tweet_id);
        let header = oauth::authorization_header(
            "DELETE",
            &url,
            credential,
            &oauth::nonce(),
            Utc::now().timestamp() as u64,
        );

        let response = self.http.delete(&url).header(AUTHORIZATION, header).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(TwitterError::classify(Some(status.as_u16()), &message))
        }
    }
}

#[async_trait]
impl SocialPort for TwitterClient {
    async fn post(
        &self,
        credential: &SocialCredential,
        text: &str,
    ) -> Result<PostedTweet, PostError> {
        info!("Posting tweet as {}: \"{}\"", credential.name, text);
        post_with_retry(self.sleeper.as_ref(), self.config.max_attempts, || {
            self.send_post(credential, text)
        })
        .await
    }

    async fn delete(
        &self,
        credential: &SocialCredential,
        tweet_id: &str,
    ) -> Result<(), DeleteError> {
        info!("Deleting tweet {} as {}", tweet_id, credential.name);
        delete_with_retry(self.sleeper.as_ref(), self.config.max_attempts, || {
            self.send_delete(credential, tweet_id)
        })
        .await
    }
}

/// Post retry policy, evaluated per attempt:
/// rate limited -> wait `min(attempt * 60s, 300s)` and retry;
/// duplicate/permission -> abort immediately;
/// anything else -> wait `attempt * 15s` if attempts remain, else report it.
/// Running out of attempts on the rate-limit path reports retry exhaustion.
pub(crate) async fn post_with_retry<F, Fut>(
    sleeper: &dyn Sleeper,
    max_attempts: u32,
    attempt_fn: F,
) -> Result<PostedTweet, PostError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<PostedTweet, TwitterError>>,
{
    for attempt in 1..=max_attempts {
        match attempt_fn().await {
            Ok(tweet) => {
                info!("Tweet posted: {}", tweet.url);
                return Ok(tweet);
            }
            Err(e) if e.is_rate_limited() => {
                let wait = Duration::from_secs(attempt as u64 * 60).min(BACKOFF_CAP);
                warn!(
                    "Rate limited posting tweet (attempt {}/{}), backing off {:?}",
                    attempt, max_attempts, wait
                );
                sleeper.sleep(wait).await;
            }
            Err(e) if e.is_permanent() => {
                warn!("Tweet rejected: {}", e);
                return Err(PostError::DuplicateOrPermission);
            }
            Err(e) => {
                warn!(
                    "Failed to post tweet (attempt {}/{}): {}",
                    attempt, max_attempts, e
                );
                if attempt < max_attempts {
                    sleeper.sleep(Duration::from_secs(attempt as u64 * 15)).await;
                } else {
                    return Err(PostError::Failed(e.to_string()));
                }
            }
        }
    }
    Err(PostError::MaxRetriesExceeded)
}

/// Delete retry policy: rate-limit backoff capped like the post path but on
/// a 30-second step, generic-error wait fixed at 15s.
pub(crate) async fn delete_with_retry<F, Fut>(
    sleeper: &dyn Sleeper,
    max_attempts: u32,
    attempt_fn: F,
) -> Result<(), DeleteError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<(), TwitterError>>,
{
    for attempt in 1..=max_attempts {
        match attempt_fn().await {
            Ok(()) => {
                info!("Tweet deleted");
                return Ok(());
            }
            Err(e) if e.is_rate_limited() => {
                let wait = Duration::from_secs(attempt as u64 * 30).min(BACKOFF_CAP);
                warn!(
                    "Rate limited deleting tweet (attempt {}/{}), backing off {:?}",
                    attempt, max_attempts, wait
                );
                sleeper.sleep(wait).await;
            }
            Err(e) => {
                warn!(
                    "Failed to delete tweet (attempt {}/{}): {}",
                    attempt, max_attempts, e
                );
                if attempt < max_attempts {
                    sleeper.sleep(Duration::from_secs(15)).await;
                } else {
                    return Err(DeleteError::Failed(e.to_string()));
                }
            }
        }
    }
    Err(DeleteError::MaxRetriesExceeded)
}
