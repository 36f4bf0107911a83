//! Account Orchestrator
//!
//! Drives one account through the full quest workflow: login handshake,
//! balance lookup, daily check-in, quest-state probe, then the conditional
//! post / claim / delete sequence. Every sub-result is interpreted into a
//! structured report; fatal failures short-circuit the pass, soft failures
//! are logged and the pass continues.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapters::proxy::ProxySet;
use crate::config::CredentialSet;
use crate::domain::{mask_proxy, random_status, Account, TweetArtifact};
use crate::ports::clock::Sleeper;
use crate::ports::loyalty::{CheckInOutcome, ClaimOutcome, SessionFactory};
use crate::ports::social::SocialPort;

/// Why an account pass ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// No social credential assigned; tweet tasks skipped entirely
    SkippedNoCredential,
    /// CSRF fetch or login failed; pass aborted, next account proceeds
    AuthFailed(String),
    /// Quest already claimed today; pass ends early, counts as success
    QuestAlreadyClaimed,
    /// Posting the status update failed; no claim attempted
    PostFailed(String),
    /// Claim hard-failed after posting; cleanup skipped
    ClaimFailed(String),
    /// Post, claim and cleanup all ran
    Completed,
}

/// Structured result of one account pass.
#[derive(Debug, Clone)]
pub struct AccountReport {
    pub account_id: usize,
    pub outcome: PassOutcome,
    pub balance: Option<f64>,
    pub check_in: Option<CheckInOutcome>,
    pub tweet: Option<TweetArtifact>,
    pub tweet_deleted: bool,
}

impl AccountReport {
    fn new(account_id: usize, outcome: PassOutcome) -> Self {
        Self {
            account_id,
            outcome,
            balance: None,
            check_in: None,
            tweet: None,
            tweet_deleted: false,
        }
    }
}

/// Coordinates one account's pass across the loyalty and social adapters.
pub struct AccountOrchestrator<F, S> {
    sessions: F,
    social: S,
    sleeper: Arc<dyn Sleeper>,
    /// Platform-side indexing delay before claiming, and again before cleanup.
    /// The loyalty backend verifies the post by fetching its URL.
    grace_period: Duration,
}

impl<F: SessionFactory, S: SocialPort> AccountOrchestrator<F, S> {
    pub fn new(sessions: F, social: S, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            sessions,
            social,
            sleeper,
            grace_period: Duration::from_secs(30),
        }
    }

    /// Override the post-indexing grace period
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Run the whole workflow for one account. Never returns an error: every
    /// failure mode is folded into the report.
    pub async fn process_account(
        &self,
        account: &Account,
        credentials: &CredentialSet,
        proxies: &ProxySet,
    ) -> AccountReport {
        let credential = credentials.by_index(account.index());
        let proxy = proxies.by_index(account.index());

        info!("Processing {} ({})", account.name, account.masked_address());
        info!(
            "  Twitter: {} | Proxy: {}",
            credential.map(|c| c.name.as_str()).unwrap_or("none"),
            proxy.map(mask_proxy).unwrap_or_else(|| "none".to_string())
        );

        let Some(credential) = credential else {
            warn!(
                "{}: no Twitter credential available - skipping tweet tasks",
                account.name
            );
            return AccountReport::new(account.id, PassOutcome::SkippedNoCredential);
        };

        let mut session = match self.sessions.open_session(account, proxy) {
            Ok(session) => session,
            Err(e) => {
                warn!("{}: could not open session: {}", account.name, e);
                return AccountReport::new(account.id, PassOutcome::AuthFailed(e.to_string()));
            }
        };

        let csrf_token = match session.fetch_csrf().await {
            Ok(token) => token,
            Err(e) => {
                warn!("{}: CSRF fetch failed: {}", account.name, e);
                return AccountReport::new(account.id, PassOutcome::AuthFailed(e.to_string()));
            }
        };

        if let Err(e) = session.authenticate(&csrf_token).await {
            warn!("{}: login failed: {}", account.name, e);
            return AccountReport::new(account.id, PassOutcome::AuthFailed(e.to_string()));
        }
        info!("{}: login success", account.name);

        let mut report = AccountReport::new(account.id, PassOutcome::Completed);
        report.balance = session.fetch_balance().await;
        report.check_in = Some(session.complete_check_in().await);

        if session.check_quest_status().await {
            info!("{}: tweet quest already claimed - done for today", account.name);
            report.outcome = PassOutcome::QuestAlreadyClaimed;
            return report;
        }

        let text = random_status();
        let posted = match self.social.post(credential, &text).await {
            Ok(posted) => posted,
            Err(e) => {
                warn!("{}: failed to post tweet - skipping claim", account.name);
                report.outcome = PassOutcome::PostFailed(e.to_string());
                return report;
            }
        };
        let tweet = TweetArtifact {
            id: posted.id,
            url: posted.url,
            text,
            credential_name: credential.name.clone(),
        };
        report.tweet = Some(tweet.clone());

        info!(
            "{}: waiting {:?} for the post to be indexed before claiming",
            account.name, self.grace_period
        );
        self.sleeper.sleep(self.grace_period).await;

        match session.claim_quest(&tweet.url).await {
            ClaimOutcome::Queued => info!("{}: tweet quest claimed", account.name),
            ClaimOutcome::AlreadyClaimed => {
                info!("{}: tweet quest was already claimed", account.name)
            }
            ClaimOutcome::Failed(reason) => {
                warn!("{}: tweet quest claim failed: {}", account.name, reason);
                report.outcome = PassOutcome::ClaimFailed(reason);
                return report;
            }
        }

        // The post is a throwaway side effect of the quest; clean it up once
        // the claim has settled.
        info!(
            "{}: waiting {:?} before deleting the tweet",
            account.name, self.grace_period
        );
        self.sleeper.sleep(self.grace_period).await;

        match self.social.delete(credential, &tweet.id).await {
            Ok(()) => {
                info!("{}: tweet deleted", account.name);
                report.tweet_deleted = true;
            }
            Err(e) => warn!("{}: failed to delete tweet: {}", account.name, e),
        }

        info!("{} completed", account.name);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SocialCredential;
    use crate::ports::loyalty::LoyaltyError;
    use crate::ports::mocks::{MockSessionFactory, MockSocial, RecordingSleeper, SessionScript};
    use crate::ports::social::PostError;

    fn account() -> Account {
        Account {
            id: 1,
            private_key:
                "0x0000000000000000000000000000000000000000000000000000000000000001".to_string(),
            address: "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".to_string(),
            name: "Account 1".to_string(),
        }
    }

    fn credentials() -> CredentialSet {
        CredentialSet::from_entries(vec![SocialCredential {
            app_key: "k".to_string(),
            app_secret: "s".to_string(),
            access_token: "t".to_string(),
            access_secret: "ts".to_string(),
            name: "Twitter 1".to_string(),
        }])
    }

    fn orchestrator(
        script: SessionScript,
        social: MockSocial,
    ) -> (
        AccountOrchestrator<MockSessionFactory, MockSocial>,
        MockSessionFactory,
        RecordingSleeper,
    ) {
        let factory = MockSessionFactory::new(script);
        let sleeper = RecordingSleeper::new();
        let orchestrator =
            AccountOrchestrator::new(factory.clone(), social, Arc::new(sleeper.clone()));
        (orchestrator, factory, sleeper)
    }

    #[tokio::test]
    async fn test_full_pass_posts_claims_and_cleans_up() {
        let (orchestrator, factory, sleeper) =
            orchestrator(SessionScript::default(), MockSocial::new());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert_eq!(report.outcome, PassOutcome::Completed);
        assert!(report.tweet_deleted);
        let tweet = report.tweet.expect("tweet artifact");
        assert_eq!(tweet.credential_name, "Twitter 1");
        assert!(tweet.url.contains(&tweet.id));
        // Grace period before claim and again before cleanup
        assert_eq!(
            sleeper.durations(),
            vec![Duration::from_secs(30), Duration::from_secs(30)]
        );
        assert_eq!(factory.claimed_urls(), vec![tweet.url.clone()]);
        assert_eq!(
            factory.calls(),
            vec![
                "fetch_csrf",
                "authenticate",
                "fetch_balance",
                "complete_check_in",
                "check_quest_status",
                "claim_quest"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_credential_skips_whole_pass() {
        let (orchestrator, factory, sleeper) =
            orchestrator(SessionScript::default(), MockSocial::new());

        let report = orchestrator
            .process_account(&account(), &CredentialSet::default(), &ProxySet::default())
            .await;

        assert_eq!(report.outcome, PassOutcome::SkippedNoCredential);
        assert_eq!(factory.open_count(), 0);
        assert_eq!(sleeper.count(), 0);
    }

    #[tokio::test]
    async fn test_csrf_failure_aborts_before_login() {
        let script = SessionScript {
            csrf_token: None,
            ..SessionScript::default()
        };
        let (orchestrator, factory, _sleeper) = orchestrator(script, MockSocial::new());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert!(matches!(report.outcome, PassOutcome::AuthFailed(_)));
        assert_eq!(factory.calls(), vec!["fetch_csrf"]);
    }

    #[tokio::test]
    async fn test_login_failure_aborts_pass() {
        let script = SessionScript {
            auth_ok: false,
            ..SessionScript::default()
        };
        let (orchestrator, factory, _sleeper) = orchestrator(script, MockSocial::new());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert!(matches!(report.outcome, PassOutcome::AuthFailed(_)));
        assert_eq!(factory.calls(), vec!["fetch_csrf", "authenticate"]);
        assert!(report.tweet.is_none());
    }

    #[tokio::test]
    async fn test_already_claimed_quest_ends_pass_early() {
        let script = SessionScript {
            quest_already_claimed: true,
            ..SessionScript::default()
        };
        let social = MockSocial::new();
        let (orchestrator, factory, sleeper) = orchestrator(script, social.clone());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert_eq!(report.outcome, PassOutcome::QuestAlreadyClaimed);
        assert!(social.posted_texts().is_empty());
        assert!(!factory.calls().contains(&"claim_quest".to_string()));
        assert_eq!(sleeper.count(), 0);
    }

    #[tokio::test]
    async fn test_post_failure_skips_claim() {
        let social = MockSocial::new().with_post(Err(PostError::MaxRetriesExceeded));
        let (orchestrator, factory, sleeper) =
            orchestrator(SessionScript::default(), social);

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert!(matches!(report.outcome, PassOutcome::PostFailed(_)));
        assert!(!factory.calls().contains(&"claim_quest".to_string()));
        assert!(report.tweet.is_none());
        assert_eq!(sleeper.count(), 0);
    }

    #[tokio::test]
    async fn test_claim_hard_failure_skips_cleanup() {
        let script = SessionScript {
            claim: ClaimOutcome::Failed("verification rejected".to_string()),
            ..SessionScript::default()
        };
        let social = MockSocial::new();
        let (orchestrator, _factory, sleeper) = orchestrator(script, social.clone());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert!(matches!(report.outcome, PassOutcome::ClaimFailed(_)));
        assert!(report.tweet.is_some());
        assert!(!report.tweet_deleted);
        assert!(social.deleted_ids().is_empty());
        // Only the pre-claim grace wait ran
        assert_eq!(sleeper.durations(), vec![Duration::from_secs(30)]);
    }

    #[tokio::test]
    async fn test_already_claimed_on_claim_still_cleans_up() {
        let script = SessionScript {
            claim: ClaimOutcome::AlreadyClaimed,
            ..SessionScript::default()
        };
        let social = MockSocial::new();
        let (orchestrator, _factory, _sleeper) = orchestrator(script, social.clone());

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert_eq!(report.outcome, PassOutcome::Completed);
        assert!(report.tweet_deleted);
        assert_eq!(social.deleted_ids().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_still_reports_completed() {
        let social = MockSocial::new().with_delete(Err(
            crate::ports::social::DeleteError::MaxRetriesExceeded,
        ));
        let (orchestrator, _factory, _sleeper) =
            orchestrator(SessionScript::default(), social);

        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;

        assert_eq!(report.outcome, PassOutcome::Completed);
        assert!(!report.tweet_deleted);
    }

    #[tokio::test]
    async fn test_session_open_failure_is_auth_failure() {
        struct FailingFactory;
        impl SessionFactory for FailingFactory {
            fn open_session(
                &self,
                _account: &Account,
                _proxy: Option<&str>,
            ) -> Result<Box<dyn crate::ports::loyalty::QuestSession>, LoyaltyError> {
                Err(LoyaltyError::ClientBuild("bad proxy".to_string()))
            }
        }

        let orchestrator = AccountOrchestrator::new(
            FailingFactory,
            MockSocial::new(),
            Arc::new(RecordingSleeper::new()),
        );
        let report = orchestrator
            .process_account(&account(), &credentials(), &ProxySet::default())
            .await;
        assert!(matches!(report.outcome, PassOutcome::AuthFailed(_)));
    }
}
