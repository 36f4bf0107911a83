//! Wallet Adapter
//!
//! Private-key handling for the loyalty login: address derivation, the
//! EIP-4361-style sign-in message in both plaintext and JSON form, and the
//! EIP-191 signature proving address ownership.

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

const SIGN_IN_DOMAIN: &str = "loyalty.usecorn.com";
const SIGN_IN_URI: &str = "https://loyalty.usecorn.com";
const SIGN_IN_STATEMENT: &str = "Sign in to the app. Powered by Snag Solutions.";
const SIGN_IN_VERSION: &str = "1";
const SIGN_IN_CHAIN_ID: u64 = 1;

/// Derive the EIP-55 checksummed address for a raw private key.
pub fn derive_address(private_key: &str) -> Result<String, WalletError> {
    let signer: PrivateKeySigner = private_key
        .trim()
        .parse()
        .map_err(|e| WalletError::InvalidKey(format!("{e}")))?;
    Ok(signer.address().to_string())
}

/// Current UTC instant in the millisecond ISO-8601 form the API expects.
pub fn issued_at_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// JSON body of the sign-in message. Field order matters to the backend's
/// verifier, so it mirrors the plaintext line order.
#[derive(Serialize)]
struct SignInFields<'a> {
    domain: &'a str,
    address: &'a str,
    statement: &'a str,
    uri: &'a str,
    version: &'a str,
    #[serde(rename = "chainId")]
    chain_id: u64,
    nonce: &'a str,
    #[serde(rename = "issuedAt")]
    issued_at: &'a str,
}

/// The sign-in message in the two forms the login payload needs: the
/// plaintext that gets signed and the JSON encoding submitted alongside.
///
/// Deterministic for identical address/nonce/timestamp inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInMessage {
    pub text: String,
    pub json: String,
}

impl SignInMessage {
    pub fn new(address: &str, nonce: &str, issued_at: &str) -> Self {
        let text = format!(
            "{SIGN_IN_DOMAIN} wants you to sign in with your Ethereum account:\n\
             {address}\n\n\
             {SIGN_IN_STATEMENT}\n\n\
             URI: {SIGN_IN_URI}\n\
             Version: {SIGN_IN_VERSION}\n\
             Chain ID: {SIGN_IN_CHAIN_ID}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}"
        );

        let fields = SignInFields {
            domain: SIGN_IN_DOMAIN,
            address,
            statement: SIGN_IN_STATEMENT,
            uri: SIGN_IN_URI,
            version: SIGN_IN_VERSION,
            chain_id: SIGN_IN_CHAIN_ID,
            nonce,
            issued_at,
        };
        // Serialization of a plain struct with string/number fields cannot fail
        let json = serde_json::to_string(&fields).unwrap_or_default();

        Self { text, json }
    }
}

/// Signer bound to one account's private key.
pub struct WalletSigner {
    signer: PrivateKeySigner,
    address: String,
}

impl WalletSigner {
    pub fn from_key(private_key: &str) -> Result<Self, WalletError> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| WalletError::InvalidKey(format!("{e}")))?;
        let address = signer.address().to_string();
        Ok(Self { signer, address })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// EIP-191 personal-message signature, 0x-prefixed hex.
    pub fn sign_text(&self, message: &str) -> Result<String, WalletError> {
        let signature = self
            .signer
            .sign_message_sync(message.as_bytes())
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test vector: private key 0x...01
    const TEST_KEY: &str = "0x0000000000000000000000000000000000000000000000000000000000000001";
    const TEST_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    #[test]
    fn test_derive_address_known_key() {
        let address = derive_address(TEST_KEY).unwrap();
        assert_eq!(address, TEST_ADDRESS);
    }

    #[test]
    fn test_derive_address_rejects_garbage() {
        let result = derive_address("not-a-key");
        assert!(matches!(result, Err(WalletError::InvalidKey(_))));
    }

    #[test]
    fn test_sign_in_message_is_deterministic() {
        let a = SignInMessage::new(TEST_ADDRESS, "nonce123", "2026-08-06T10:00:00.000Z");
        let b = SignInMessage::new(TEST_ADDRESS, "nonce123", "2026-08-06T10:00:00.000Z");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_in_message_text_layout() {
        let msg = SignInMessage::new(TEST_ADDRESS, "abc", "2026-08-06T10:00:00.000Z");
        let lines: Vec<&str> = msg.text.lines().collect();
        assert_eq!(
            lines[0],
            "loyalty.usecorn.com wants you to sign in with your Ethereum account:"
        );
        assert_eq!(lines[1], TEST_ADDRESS);
        assert_eq!(lines[3], "Sign in to the app. Powered by Snag Solutions.");
        assert!(lines.contains(&"Version: 1"));
        assert!(lines.contains(&"Chain ID: 1"));
        assert!(lines.contains(&"Nonce: abc"));
        assert!(lines.contains(&"Issued At: 2026-08-06T10:00:00.000Z"));
    }

    #[test]
    fn test_sign_in_message_json_field_order() {
        let msg = SignInMessage::new(TEST_ADDRESS, "abc", "2026-08-06T10:00:00.000Z");
        let domain_pos = msg.json.find("\"domain\"").unwrap();
        let address_pos = msg.json.find("\"address\"").unwrap();
        let nonce_pos = msg.json.find("\"nonce\"").unwrap();
        let issued_pos = msg.json.find("\"issuedAt\"").unwrap();
        assert!(domain_pos < address_pos);
        assert!(address_pos < nonce_pos);
        assert!(nonce_pos < issued_pos);
        assert!(msg.json.contains("\"chainId\":1"));
    }

    #[test]
    fn test_signature_is_deterministic_hex() {
        let signer = WalletSigner::from_key(TEST_KEY).unwrap();
        let msg = SignInMessage::new(signer.address(), "abc", "2026-08-06T10:00:00.000Z");
        let first = signer.sign_text(&msg.text).unwrap();
        let second = signer.sign_text(&msg.text).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("0x"));
        // 65-byte signature = 130 hex chars + prefix
        assert_eq!(first.len(), 132);
    }

    #[test]
    fn test_issued_at_shape() {
        let stamp = issued_at_now();
        // 2026-08-06T10:00:00.000Z
        assert_eq!(stamp.len(), 24);
        assert!(stamp.ends_with('Z'));
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], "T");
    }
}
