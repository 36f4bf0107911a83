//! Loyalty Adapter
//!
//! Session factory and authenticated calls against the Corn loyalty API:
//! CSRF handshake, signed credential login, balance lookup, daily check-in
//! and tweet quest probe/claim.

mod client;
mod types;

pub use client::{LoyaltyClient, LoyaltyConfig, LoyaltySession};
