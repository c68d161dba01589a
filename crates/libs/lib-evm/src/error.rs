//! # Chain and Submission Errors
//!
//! Two layers of errors:
//!
//! - [`ChainError`]: what a single provider request or contract call can fail
//!   with. Produced by [`crate::provider`] and [`crate::contracts`].
//! - [`SubmissionError`]: the outcome taxonomy of one policy submission
//!   attempt, grouped into [`FailureKind`]s the dashboard can act on.
//!
//! ## JSON-RPC error mapping
//!
//! | JSON-RPC error | `ChainError` |
//! |---|---|
//! | code `4001` | `UserRejected` |
//! | code `3`, or message containing `execution reverted` | `Reverted` |
//! | any other code | `Rpc` |
//! | HTTP or socket failure | `Transport` |

use std::time::Duration;

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::{Panic, Revert, SolError};
use serde::Deserialize;
use thiserror::Error;

/// EIP-1193 "User Rejected Request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Geth-style revert with revert data attached.
pub const EXECUTION_REVERTED_CODE: i64 = 3;

/// Errors from a single provider request or contract call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("User rejected the request: {0}")]
    UserRejected(String),

    #[error("Execution reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted {
        reason: Option<String>,
        data: Option<Bytes>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Decoding error: {0}")]
    Decode(String),

    #[error("No signer available: {0}")]
    NoSigner(String),
}

/// `error` member of a JSON-RPC 2.0 response.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl From<RpcErrorObject> for ChainError {
    fn from(err: RpcErrorObject) -> Self {
        if err.code == USER_REJECTED_CODE {
            return ChainError::UserRejected(err.message);
        }

        let mentions_revert = err.message.to_lowercase().contains("execution reverted");
        if err.code == EXECUTION_REVERTED_CODE || mentions_revert {
            let data = err.data.as_ref().and_then(revert_data);
            let reason = data
                .as_ref()
                .and_then(|d| decode_revert_reason(d))
                .or_else(|| reason_from_message(&err.message));
            return ChainError::Reverted { reason, data };
        }

        ChainError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

impl From<reqwest::Error> for ChainError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChainError::Transport("request timed out".to_string())
        } else if err.is_decode() {
            ChainError::Decode(err.to_string())
        } else {
            ChainError::Transport(err.to_string())
        }
    }
}

/// Revert data is either a hex string or, on some nodes, `{ "data": "0x.." }`.
fn revert_data(value: &serde_json::Value) -> Option<Bytes> {
    match value {
        serde_json::Value::String(hex) => hex.parse::<Bytes>().ok(),
        serde_json::Value::Object(map) => map.get("data").and_then(revert_data),
        _ => None,
    }
}

fn reason_from_message(message: &str) -> Option<String> {
    let (_, reason) = message.split_once("execution reverted:")?;
    let reason = reason.trim();
    (!reason.is_empty()).then(|| reason.to_string())
}

/// Decode `Error(string)` or `Panic(uint256)` revert data.
pub fn decode_revert_reason(data: &[u8]) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data, true) {
        return Some(revert.reason);
    }
    Panic::abi_decode(data, true)
        .ok()
        .map(|panic| format!("panic code 0x{:x}", panic.code))
}

/// Coarse failure classes for a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No wallet connected; nothing was sent
    NotConnected,
    /// User declined to sign
    Declined,
    /// Executed and reverted on-chain
    Reverted,
    /// Network, node or confirmation-timeout failure
    Transient,
    /// Transaction confirmed but the deployed policy could not be identified
    Integrity,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::NotConnected => "Not connected",
            FailureKind::Declined => "Declined",
            FailureKind::Reverted => "Reverted",
            FailureKind::Transient => "Network",
            FailureKind::Integrity => "Integrity",
        }
    }
}

/// Outcome of a failed policy submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Signature request declined: {0}")]
    UserRejected(String),

    #[error("Transaction reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Reverted {
        reason: Option<String>,
        tx_hash: Option<B256>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Confirmation timed out after {}s", .waited.as_secs())]
    Timeout {
        waited: Duration,
        tx_hash: Option<B256>,
    },

    /// The deployment confirmed but its policy could not be read back.
    /// Retrying would deploy a second policy.
    #[error("Deployed policy could not be identified: {reason}")]
    Integrity {
        reason: String,
        tx_hash: Option<B256>,
    },
}

impl SubmissionError {
    pub fn integrity(reason: impl Into<String>) -> Self {
        SubmissionError::Integrity {
            reason: reason.into(),
            tx_hash: None,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            SubmissionError::NotConnected => FailureKind::NotConnected,
            SubmissionError::UserRejected(_) => FailureKind::Declined,
            SubmissionError::Reverted { .. } => FailureKind::Reverted,
            SubmissionError::Network(_) | SubmissionError::Timeout { .. } => FailureKind::Transient,
            SubmissionError::Integrity { .. } => FailureKind::Integrity,
        }
    }

    /// Whether the same submission may be attempted again as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), FailureKind::Declined | FailureKind::Transient)
    }

    /// Transaction this failure is about, if one was broadcast.
    pub fn tx_hash(&self) -> Option<B256> {
        match self {
            SubmissionError::Reverted { tx_hash, .. }
            | SubmissionError::Timeout { tx_hash, .. }
            | SubmissionError::Integrity { tx_hash, .. } => *tx_hash,
            _ => None,
        }
    }

    /// Attach the broadcast transaction hash to reverts, timeouts and
    /// integrity failures.
    pub fn with_tx_hash(self, hash: B256) -> Self {
        match self {
            SubmissionError::Reverted { reason, .. } => SubmissionError::Reverted {
                reason,
                tx_hash: Some(hash),
            },
            SubmissionError::Timeout { waited, .. } => SubmissionError::Timeout {
                waited,
                tx_hash: Some(hash),
            },
            SubmissionError::Integrity { reason, .. } => SubmissionError::Integrity {
                reason,
                tx_hash: Some(hash),
            },
            other => other,
        }
    }

    /// Message suitable for the dashboard status line.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::NotConnected => "Connect a wallet before creating a policy.".to_string(),
            SubmissionError::UserRejected(_) => {
                "The wallet declined the transaction. You can try again.".to_string()
            }
            SubmissionError::Reverted { reason: Some(reason), .. } => {
                format!("The deployer rejected the policy: {}", reason)
            }
            SubmissionError::Reverted { reason: None, .. } => {
                "The deployer rejected the policy.".to_string()
            }
            SubmissionError::Network(msg) => {
                format!("Could not reach the network ({}). Please retry.", msg)
            }
            SubmissionError::Timeout { waited, .. } => format!(
                "No confirmation after {}s. The transaction may still be mined; check before retrying.",
                waited.as_secs()
            ),
            SubmissionError::Integrity { reason, tx_hash: Some(hash) } => format!(
                "The policy transaction {} confirmed but its contract was not found: {}. Do not resubmit.",
                hash, reason
            ),
            SubmissionError::Integrity { reason, tx_hash: None } => {
                format!("The policy transaction confirmed but its contract was not found: {}", reason)
            }
        }
    }
}

impl From<ChainError> for SubmissionError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::UserRejected(msg) => SubmissionError::UserRejected(msg),
            ChainError::Reverted { reason, .. } => SubmissionError::Reverted {
                reason,
                tx_hash: None,
            },
            ChainError::Timeout(waited) => SubmissionError::Timeout {
                waited,
                tx_hash: None,
            },
            ChainError::NoSigner(_) => SubmissionError::NotConnected,
            ChainError::Transport(msg) | ChainError::Decode(msg) => SubmissionError::Network(msg),
            ChainError::Rpc { code, message } => {
                SubmissionError::Network(format!("node error {}: {}", code, message))
            }
        }
    }
}
