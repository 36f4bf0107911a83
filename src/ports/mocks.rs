//! Recording test doubles for the port traits.
//!
//! Used by unit tests in `application/` and by the integration suite. All
//! doubles record their calls behind `Arc<Mutex<_>>` so tests can assert on
//! interaction shape without any network or timer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Account, SocialCredential};
use crate::ports::clock::Sleeper;
use crate::ports::loyalty::{
    CheckInOutcome, ClaimOutcome, LoyaltyError, QuestSession, SessionFactory,
};
use crate::ports::social::{DeleteError, PostError, PostedTweet, SocialPort};

/// Sleeper that records requested durations and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn total(&self) -> Duration {
        self.sleeps.lock().unwrap().iter().sum()
    }

    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Social port double with scripted responses.
///
/// Results queue up front-to-back; once the script is exhausted, posts
/// succeed with a fixed id and deletes succeed silently.
#[derive(Debug, Clone, Default)]
pub struct MockSocial {
    post_script: Arc<Mutex<VecDeque<Result<PostedTweet, PostError>>>>,
    delete_script: Arc<Mutex<VecDeque<Result<(), DeleteError>>>>,
    posts: Arc<Mutex<Vec<String>>>,
    deletes: Arc<Mutex<Vec<String>>>,
}

impl MockSocial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to queue a post result
    pub fn with_post(self, result: Result<PostedTweet, PostError>) -> Self {
        self.post_script.lock().unwrap().push_back(result);
        self
    }

    /// Builder method to queue a delete result
    pub fn with_delete(self, result: Result<(), DeleteError>) -> Self {
        self.delete_script.lock().unwrap().push_back(result);
        self
    }

    pub fn posted_texts(&self) -> Vec<String> {
        self.posts.lock().unwrap().clone()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPort for MockSocial {
    async fn post(
        &self,
        _credential: &SocialCredential,
        text: &str,
    ) -> Result<PostedTweet, PostError> {
        self.posts.lock().unwrap().push(text.to_string());
        self.post_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(PostedTweet {
                    id: "1800000000000000001".to_string(),
                    url: "https://x.com/i/web/status/1800000000000000001".to_string(),
                })
            })
    }

    async fn delete(
        &self,
        _credential: &SocialCredential,
        tweet_id: &str,
    ) -> Result<(), DeleteError> {
        self.deletes.lock().unwrap().push(tweet_id.to_string());
        self.delete_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Behavior script for a [`ScriptedSession`].
#[derive(Debug, Clone)]
pub struct SessionScript {
    /// `None` makes `fetch_csrf` fail
    pub csrf_token: Option<String>,
    pub auth_ok: bool,
    pub balance: Option<f64>,
    pub check_in: CheckInOutcome,
    pub quest_already_claimed: bool,
    pub claim: ClaimOutcome,
}

impl Default for SessionScript {
    fn default() -> Self {
        Self {
            csrf_token: Some("test-csrf-token".to_string()),
            auth_ok: true,
            balance: Some(125.0),
            check_in: CheckInOutcome::AlreadyClaimed,
            quest_already_claimed: false,
            claim: ClaimOutcome::Queued,
        }
    }
}

/// Quest session double driven by a [`SessionScript`].
pub struct ScriptedSession {
    script: SessionScript,
    calls: Arc<Mutex<Vec<String>>>,
    claimed_urls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl QuestSession for ScriptedSession {
    async fn fetch_csrf(&mut self) -> Result<String, LoyaltyError> {
        self.calls.lock().unwrap().push("fetch_csrf".to_string());
        self.script
            .csrf_token
            .clone()
            .ok_or_else(|| LoyaltyError::CsrfFailed("scripted failure".to_string()))
    }

    async fn authenticate(&mut self, _csrf_token: &str) -> Result<(), LoyaltyError> {
        self.calls.lock().unwrap().push("authenticate".to_string());
        if self.script.auth_ok {
            Ok(())
        } else {
            Err(LoyaltyError::LoginFailed(
                "no session token received".to_string(),
            ))
        }
    }

    async fn fetch_balance(&mut self) -> Option<f64> {
        self.calls.lock().unwrap().push("fetch_balance".to_string());
        self.script.balance
    }

    async fn complete_check_in(&mut self) -> CheckInOutcome {
        self.calls
            .lock()
            .unwrap()
            .push("complete_check_in".to_string());
        self.script.check_in.clone()
    }

    async fn check_quest_status(&mut self) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push("check_quest_status".to_string());
        self.script.quest_already_claimed
    }

    async fn claim_quest(&mut self, tweet_url: &str) -> ClaimOutcome {
        self.calls.lock().unwrap().push("claim_quest".to_string());
        self.claimed_urls.lock().unwrap().push(tweet_url.to_string());
        self.script.claim.clone()
    }
}

/// Session factory double handing out [`ScriptedSession`]s.
#[derive(Clone, Default)]
pub struct MockSessionFactory {
    script: SessionScript,
    opens: Arc<Mutex<usize>>,
    calls: Arc<Mutex<Vec<String>>>,
    claimed_urls: Arc<Mutex<Vec<String>>>,
}

impl MockSessionFactory {
    pub fn new(script: SessionScript) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    /// Number of sessions opened so far
    pub fn open_count(&self) -> usize {
        *self.opens.lock().unwrap()
    }

    /// All session method calls, across every opened session, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Tweet URLs submitted as claim evidence
    pub fn claimed_urls(&self) -> Vec<String> {
        self.claimed_urls.lock().unwrap().clone()
    }
}

impl SessionFactory for MockSessionFactory {
    fn open_session(
        &self,
        _account: &Account,
        _proxy: Option<&str>,
    ) -> Result<Box<dyn QuestSession>, LoyaltyError> {
        *self.opens.lock().unwrap() += 1;
        Ok(Box::new(ScriptedSession {
            script: self.script.clone(),
            calls: Arc::clone(&self.calls),
            claimed_urls: Arc::clone(&self.claimed_urls),
        }))
    }
}
