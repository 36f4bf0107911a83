//! Response shapes and outcome classifiers for the loyalty API.
//!
//! The quest endpoints signal "already claimed" through several status/
//! message combinations; the classifiers normalize those deterministically,
//! status code first, message content second.

use serde::Deserialize;

use crate::ports::loyalty::ClaimOutcome;

/// Response message confirming a claim was accepted for verification.
pub(crate) const CLAIM_QUEUED_MESSAGE: &str = "Completion request added to queue";

const ALREADY_COMPLETED_MARKER: &str = "already completed";

#[derive(Debug, Deserialize)]
pub(crate) struct CsrfResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceResponse {
    #[serde(default)]
    pub data: Vec<BalanceEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceEntry {
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RuleResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Map a quest-status probe response onto the already-claimed flag.
pub(crate) fn classify_quest_status(status: u16, message: Option<&str>) -> bool {
    if status == 400 {
        return true;
    }
    if status == 200 {
        if let Some(message) = message {
            if message.contains(ALREADY_COMPLETED_MARKER) {
                return true;
            }
        }
    }
    false
}

/// Map a claim response onto its outcome. Only the exact queued-completion
/// phrase counts as success; unrecognized responses are failures.
pub(crate) fn classify_claim(status: u16, message: Option<&str>) -> ClaimOutcome {
    if status == 400 {
        return ClaimOutcome::AlreadyClaimed;
    }
    if status == 200 {
        return match message {
            Some(CLAIM_QUEUED_MESSAGE) => ClaimOutcome::Queued,
            Some(message) if message.contains(ALREADY_COMPLETED_MARKER) => {
                ClaimOutcome::AlreadyClaimed
            }
            Some(message) => ClaimOutcome::Failed(format!("unexpected response: {message}")),
            None => ClaimOutcome::Failed("response carried no message".to_string()),
        };
    }
    ClaimOutcome::Failed(format!("HTTP {status}"))
}
