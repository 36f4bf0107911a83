//! Configuration Module
//!
//! Loads the line-oriented external sources (accounts, Twitter credentials).
//! Proxy sources live in the proxy adapter, which mirrors the same
//! snapshot-loading shape.

pub mod stores;

pub use stores::{AccountStore, CredentialSet, CredentialStore, StoreError};
