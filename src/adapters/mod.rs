//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Loyalty: Corn loyalty API sessions (CSRF, login, quests)
//! - Twitter: v2 API posting with OAuth 1.0a signing
//! - Wallet: private-key handling and sign-in proof
//! - Proxy: outbound proxy list and normalization

pub mod loyalty;
pub mod proxy;
pub mod twitter;
pub mod wallet;

pub use loyalty::{LoyaltyClient, LoyaltyConfig};
pub use proxy::{ProxySet, ProxyStore};
pub use twitter::{TwitterClient, TwitterConfig};
pub use wallet::{WalletError, WalletSigner};
