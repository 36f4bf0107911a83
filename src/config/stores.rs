//! Line-oriented external sources.
//!
//! Three files feed the bot: accounts.txt (one private key per line, loaded
//! once at startup), x.txt (pipe-delimited Twitter credentials) and
//! proxy.txt (handled by the proxy adapter). Credential sources are
//! re-loaded once per cycle; `load()` always returns a fresh immutable
//! snapshot instead of mutating shared state.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::adapters::wallet::{self, WalletError};
use crate::domain::{Account, SocialCredential};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Read a line-oriented source, skipping blank lines and `#` comments.
pub(crate) fn read_entries(path: &Path) -> std::io::Result<Vec<String>> {
    let data = std::fs::read_to_string(path)?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// File-backed Twitter credential source.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Load a fresh snapshot. A missing or unreadable source is non-fatal:
    /// the tweet tasks degrade gracefully for accounts without an entry.
    pub fn load(&self) -> CredentialSet {
        match read_entries(&self.path) {
            Ok(lines) => {
                let entries: Vec<SocialCredential> = lines
                    .iter()
                    .enumerate()
                    .map(|(index, line)| parse_credential_line(line, index))
                    .collect();
                info!("Loaded {} Twitter credential(s)", entries.len());
                CredentialSet { entries }
            }
            Err(e) => {
                warn!(
                    "Could not read Twitter credentials from {}: {} - tweet tasks disabled",
                    self.path.display(),
                    e
                );
                CredentialSet::default()
            }
        }
    }
}

/// Immutable snapshot of the credential list, valid for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CredentialSet {
    entries: Vec<SocialCredential>,
}

impl CredentialSet {
    /// Snapshot from pre-parsed entries (tests and tooling).
    pub fn from_entries(entries: Vec<SocialCredential>) -> Self {
        Self { entries }
    }

    /// Entry at `index`, falling back to the first entry when the index runs
    /// past the list. One shared credential can serve many accounts; an
    /// empty list disables tweet tasks entirely.
    pub fn by_index(&self, index: usize) -> Option<&SocialCredential> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get(index).or_else(|| self.entries.first())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_credential_line(line: &str, index: usize) -> SocialCredential {
    let mut fields = line.split('|').map(str::trim);
    let app_key = fields.next().unwrap_or_default().to_string();
    let app_secret = fields.next().unwrap_or_default().to_string();
    let access_token = fields.next().unwrap_or_default().to_string();
    let access_secret = fields.next().unwrap_or_default().to_string();
    let name = fields
        .next()
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("Twitter {}", index + 1));

    SocialCredential {
        app_key,
        app_secret,
        access_token,
        access_secret,
        name,
    }
}

/// File-backed private-key source. Loaded once at startup, never reloaded;
/// the resulting account list is fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<Account>, StoreError> {
        let lines = read_entries(&self.path).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut accounts = Vec::with_capacity(lines.len());
        for (index, key) in lines.iter().enumerate() {
            let address = wallet::derive_address(key)?;
            accounts.push(Account {
                id: index + 1,
                private_key: key.clone(),
                address,
                name: format!("Account {}", index + 1),
            });
        }

        info!("Loaded {} account(s)", accounts.len());
        Ok(accounts)
    }
}
