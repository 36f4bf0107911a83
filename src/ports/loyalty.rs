//! Loyalty API port - one authenticated session per account pass.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Account;

/// Fatal session errors. A failure here aborts the current account's pass;
/// soft failures in later quest steps are expressed as outcomes instead.
#[derive(Debug, Error)]
pub enum LoyaltyError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("CSRF token fetch failed: {0}")]
    CsrfFailed(String),
    #[error("Login failed: {0}")]
    LoginFailed(String),
    #[error("Invalid wallet key: {0}")]
    InvalidKey(String),
}

/// Daily check-in result. HTTP 400 from the rule endpoint means the daily
/// allowance was already consumed, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    Completed,
    AlreadyClaimed,
    Failed(String),
}

/// Tweet quest claim result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Completion request accepted and queued for verification
    Queued,
    AlreadyClaimed,
    Failed(String),
}

/// One account's authenticated pass through the loyalty API.
///
/// Sessions are single-use and single-account: built fresh for each pass,
/// discarded at the end regardless of outcome.
#[async_trait]
pub trait QuestSession: Send {
    /// Fetch the anti-forgery token, folding response cookies into the session.
    async fn fetch_csrf(&mut self) -> Result<String, LoyaltyError>;

    /// Submit the signed sign-in proof. Success requires a session-token cookie.
    async fn authenticate(&mut self, csrf_token: &str) -> Result<(), LoyaltyError>;

    /// Best-effort points balance lookup.
    async fn fetch_balance(&mut self) -> Option<f64>;

    /// Complete the daily check-in rule.
    async fn complete_check_in(&mut self) -> CheckInOutcome;

    /// Probe whether the tweet quest was already claimed today.
    async fn check_quest_status(&mut self) -> bool;

    /// Submit the posted tweet URL as completion evidence.
    async fn claim_quest(&mut self, tweet_url: &str) -> ClaimOutcome;
}

/// Opens a fresh session for an account, routed through its proxy if any.
pub trait SessionFactory: Send + Sync {
    fn open_session(
        &self,
        account: &Account,
        proxy: Option<&str>,
    ) -> Result<Box<dyn QuestSession>, LoyaltyError>;
}
