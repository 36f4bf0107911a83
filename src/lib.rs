//! cornbot - Corn loyalty quest automation
//!
//! Multi-account runner for the Corn loyalty program: signs in with each
//! wallet, completes the daily check-in, and satisfies the tweet quest by
//! posting a throwaway status update, claiming it, and cleaning it up.
//!
//! # Modules
//!
//! - `domain`: Core types (Account, SocialCredential, TweetArtifact)
//! - `ports`: Trait seams (QuestSession, SocialPort, Sleeper) and test doubles
//! - `adapters`: External systems (loyalty API, Twitter, wallet, proxies)
//! - `config`: Line-oriented source loading with snapshot semantics
//! - `application`: Per-account orchestrator and the perpetual cycle scheduler

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
