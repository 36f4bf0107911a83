//! Twitter Adapter
//!
//! Status-update posting and cleanup through the v2 API, signed with
//! OAuth 1.0a user-context credentials.

mod client;
mod error;
mod oauth;

pub use client::{TwitterClient, TwitterConfig};
pub use error::TwitterError;
