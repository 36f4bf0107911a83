//! Cycle Scheduler
//!
//! Iterates all accounts sequentially forever: a countdown between accounts,
//! a long countdown between cycles, and a fresh credential/proxy snapshot
//! loaded at the start of each new cycle. The account list itself is fixed
//! at startup and never changes size or order.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::orchestrator::{AccountOrchestrator, AccountReport};
use crate::adapters::proxy::{ProxySet, ProxyStore};
use crate::config::{CredentialSet, CredentialStore};
use crate::domain::Account;
use crate::ports::clock::Sleeper;
use crate::ports::loyalty::SessionFactory;
use crate::ports::social::SocialPort;

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Pause between two accounts within a cycle
    pub inter_account_delay: Duration,
    /// Pause between two full cycles
    pub cycle_delay: Duration,
    /// Stop after this many cycles; `None` runs forever
    pub cycle_limit: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            inter_account_delay: Duration::from_secs(30),
            // A daily cycle, padded a few minutes past the reset boundary
            cycle_delay: Duration::from_secs(24 * 60 * 60 + 5 * 60),
            cycle_limit: None,
        }
    }
}

/// Perpetual multi-account, multi-cycle driver.
pub struct CycleScheduler<F, S> {
    orchestrator: AccountOrchestrator<F, S>,
    accounts: Vec<Account>,
    credential_store: CredentialStore,
    proxy_store: ProxyStore,
    sleeper: Arc<dyn Sleeper>,
    config: SchedulerConfig,
}

impl<F: SessionFactory, S: SocialPort> CycleScheduler<F, S> {
    pub fn new(
        orchestrator: AccountOrchestrator<F, S>,
        accounts: Vec<Account>,
        credential_store: CredentialStore,
        proxy_store: ProxyStore,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            orchestrator,
            accounts,
            credential_store,
            proxy_store,
            sleeper,
            config: SchedulerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run cycles until the configured limit, or forever when none is set.
    pub async fn run(&self) {
        let mut credentials = self.credential_store.load();
        let mut proxies = self.proxy_store.load();
        let mut cycle: u64 = 0;

        loop {
            cycle += 1;
            info!(
                "Starting cycle {} with {} account(s)",
                cycle,
                self.accounts.len()
            );

            self.run_cycle(&credentials, &proxies).await;
            info!("All accounts processed");

            if let Some(limit) = self.config.cycle_limit {
                if cycle >= limit {
                    break;
                }
            }

            self.countdown(self.config.cycle_delay, "Next cycle in").await;

            credentials = self.credential_store.load();
            proxies = self.proxy_store.load();
            info!("Reloaded credential and proxy sources for the next cycle");
        }
    }

    /// One sequential pass over every account, with a countdown between
    /// accounts (skipped after the last one).
    pub async fn run_cycle(
        &self,
        credentials: &CredentialSet,
        proxies: &ProxySet,
    ) -> Vec<AccountReport> {
        let mut reports = Vec::with_capacity(self.accounts.len());

        for (position, account) in self.accounts.iter().enumerate() {
            reports.push(
                self.orchestrator
                    .process_account(account, credentials, proxies)
                    .await,
            );

            if position + 1 < self.accounts.len() {
                self.countdown(self.config.inter_account_delay, "Next account in")
                    .await;
            }
        }

        reports
    }

    /// Second-granular countdown rendered as a rewriting console line. Runs
    /// to completion; mid-wait cancellation is not supported.
    async fn countdown(&self, duration: Duration, label: &str) {
        let total = duration.as_secs();
        if total == 0 {
            return;
        }

        for remaining in (1..=total).rev() {
            print!("\r{}: {} ", label, format_hms(remaining));
            let _ = std::io::stdout().flush();
            self.sleeper.sleep(Duration::from_secs(1)).await;
        }

        print!("\r{}\r", " ".repeat(50));
        let _ = std::io::stdout().flush();
    }
}

/// `HH:MM:SS` rendering for countdown displays.
pub fn format_hms(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
