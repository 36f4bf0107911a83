//! cornbot - Corn loyalty quest automation
//!
//! Perpetual multi-account runner: login handshake, daily check-in, tweet
//! quest post/claim/cleanup, one account at a time, one cycle per day.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use cornbot::adapters::proxy::{ProxySet, ProxyStore};
use cornbot::adapters::{LoyaltyClient, TwitterClient};
use cornbot::application::{AccountOrchestrator, CycleScheduler};
use cornbot::config::{AccountStore, CredentialSet, CredentialStore};
use cornbot::domain::{mask_proxy, Account};
use cornbot::ports::{Sleeper, TokioSleeper};

#[derive(Parser)]
#[command(name = "cornbot", about = "Corn loyalty quest automation")]
struct CliApp {
    #[command(subcommand)]
    command: Command,

    /// Info-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Debug-level logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the perpetual quest scheduler
    Run(SourcesCmd),
    /// Load the config sources, print the summary and exit
    Check(SourcesCmd),
}

#[derive(Args)]
struct SourcesCmd {
    /// Private-key list, one per line
    #[arg(long, default_value = "accounts.txt")]
    accounts: String,

    /// Twitter credentials, key|secret|token|tokenSecret|name per line
    #[arg(long, default_value = "x.txt")]
    twitter: String,

    /// Proxy list, one endpoint per line
    #[arg(long, default_value = "proxy.txt")]
    proxies: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets and ad-hoc overrides live in .env, not in flags
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Check(cmd) => check_command(cmd),
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

async fn run_command(cmd: SourcesCmd) -> Result<()> {
    println!("Corn Loyalty Quest Bot");
    println!("{}", "=".repeat(70));

    let accounts = AccountStore::new(&cmd.accounts)
        .load()
        .context("Failed to load accounts")?;
    if accounts.is_empty() {
        bail!("No accounts found in {}", cmd.accounts);
    }

    let credential_store = CredentialStore::new(&cmd.twitter);
    let proxy_store = ProxyStore::new(&cmd.proxies);
    print_summary(&accounts, &credential_store.load(), &proxy_store.load());

    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let social = TwitterClient::new(Arc::clone(&sleeper))
        .context("Failed to create Twitter client")?;
    let loyalty = LoyaltyClient::new();

    let orchestrator = AccountOrchestrator::new(loyalty, social, Arc::clone(&sleeper));
    let scheduler = CycleScheduler::new(
        orchestrator,
        accounts,
        credential_store,
        proxy_store,
        sleeper,
    );

    // Never returns under normal operation
    scheduler.run().await;
    Ok(())
}

fn check_command(cmd: SourcesCmd) -> Result<()> {
    let accounts = AccountStore::new(&cmd.accounts)
        .load()
        .context("Failed to load accounts")?;
    let credentials = CredentialStore::new(&cmd.twitter).load();
    let proxies = ProxyStore::new(&cmd.proxies).load();

    print_summary(&accounts, &credentials, &proxies);
    Ok(())
}

fn print_summary(accounts: &[Account], credentials: &CredentialSet, proxies: &ProxySet) {
    println!("\nConfiguration Summary:");
    println!("{}", "=".repeat(70));

    let mut missing_twitter = 0usize;
    let mut missing_proxy = 0usize;

    for account in accounts {
        let credential = credentials.by_index(account.index());
        let proxy = proxies.by_index(account.index());

        println!("{}. {}", account.id, account.name);
        println!("   Wallet:  {}", account.masked_address());
        println!(
            "   Twitter: {}",
            credential.map(|c| c.name.as_str()).unwrap_or("no config")
        );
        println!(
            "   Proxy:   {}",
            proxy.map(mask_proxy).unwrap_or_else(|| "no proxy".to_string())
        );

        missing_twitter += usize::from(credential.is_none());
        missing_proxy += usize::from(proxy.is_none());
    }

    if missing_twitter > 0 {
        println!(
            "Warning: {missing_twitter} account(s) without Twitter configuration"
        );
    }
    if missing_proxy > 0 {
        println!("Warning: {missing_proxy} account(s) without proxy");
    }

    println!("{}", "=".repeat(70));
}
