//! OAuth 1.0a request signing for the Twitter API v2 user context.
//!
//! HMAC-SHA1 over the RFC 5849 signature base string. Request bodies are
//! JSON, so only the oauth_* parameters enter the signature.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::domain::SocialCredential;

type HmacSha1 = Hmac<Sha1>;

/// Random 32-char alphanumeric nonce.
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// RFC 3986 percent-encoding (unreserved set only).
fn percent(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Build the `Authorization: OAuth ...` header value for one request.
///
/// `url` must be the request URL without query parameters. Deterministic for
/// identical inputs; callers supply a fresh nonce and timestamp per request.
pub fn authorization_header(
    method: &str,
    url: &str,
    credential: &SocialCredential,
    nonce: &str,
    timestamp: u64,
) -> String {
    let timestamp = timestamp.to_string();

    let mut params: BTreeMap<&str, &str> = BTreeMap::new();
    params.insert("oauth_consumer_key", &credential.app_key);
    params.insert("oauth_nonce", nonce);
    params.insert("oauth_signature_method", "HMAC-SHA1");
    params.insert("oauth_timestamp", &timestamp);
    params.insert("oauth_token", &credential.access_token);
    params.insert("oauth_version", "1.0");

    // BTreeMap iteration is already byte-sorted, as the base string requires
    let param_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent(k), percent(v)))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent(url),
        percent(&param_string)
    );

    let signing_key = format!(
        "{}&{}",
        percent(&credential.app_secret),
        percent(&credential.access_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .expect("HMAC-SHA1 accepts keys of any length");
    mac.update(base_string.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(&str, String)> = params
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect();
    header_params.push(("oauth_signature", signature));
    header_params.sort_by(|a, b| a.0.cmp(b.0));

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, percent(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {fields}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> SocialCredential {
        SocialCredential {
            app_key: "consumer-key".to_string(),
            app_secret: "consumer-secret".to_string(),
            access_token: "access-token".to_string(),
            access_secret: "access-secret".to_string(),
            name: "Twitter 1".to_string(),
        }
    }

    #[test]
    fn test_header_shape() {
        let header = authorization_header(
            "POST",
            "https://api.twitter.com/2/tweets",
            &credential(),
            "abcdef",
            1754000000,
        );
        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"consumer-key\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1754000000\""));
        assert!(header.contains("oauth_token=\"access-token\""));
        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn test_header_is_deterministic_for_fixed_inputs() {
        let a = authorization_header(
            "POST",
            "https://api.twitter.com/2/tweets",
            &credential(),
            "abcdef",
            1754000000,
        );
        let b = authorization_header(
            "POST",
            "https://api.twitter.com/2/tweets",
            &credential(),
            "abcdef",
            1754000000,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_method_and_url() {
        let post = authorization_header(
            "POST",
            "https://api.twitter.com/2/tweets",
            &credential(),
            "abcdef",
            1754000000,
        );
        let delete = authorization_header(
            "DELETE",
            "https://api.twitter.com/2/tweets/123",
            &credential(),
            "abcdef",
            1754000000,
        );
        assert_ne!(post, delete);
    }

    #[test]
    fn test_nonce_is_alphanumeric() {
        let n = nonce();
        assert_eq!(n.len(), 32);
        assert!(n.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(n, nonce());
    }

    #[test]
    fn test_percent_encoding_is_rfc3986() {
        assert_eq!(percent("a b+c~d"), "a%20b%2Bc~d");
    }
}
