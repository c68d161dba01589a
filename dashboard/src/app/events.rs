//! # Application Events
//!
//! Results sent from background tasks to the UI thread.

use alloy_primitives::{Address, B256};
use uuid::Uuid;

use lib_evm::{DeployedPolicyHandle, SubmissionError};

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Wallet connection attempt finished
    WalletConnected(Result<(Address, Option<u64>), String>),
    /// Policy submission attempt finished
    PolicySubmitted {
        attempt_id: Uuid,
        result: Result<DeployedPolicyHandle, SubmissionError>,
    },
    /// Premium payment into `policy` confirmed or failed
    PremiumPaid {
        policy: Address,
        result: Result<B256, String>,
    },
    /// Oracle wind speed read from `policy`, in tenths of km/h
    WindSpeedRead {
        policy: Address,
        result: Result<u64, String>,
    },
    /// Free-form status line update
    Status(String),
}
