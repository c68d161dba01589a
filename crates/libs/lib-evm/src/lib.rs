//! # EVM Library
//!
//! Wallet connection, contract calls and the policy submission flow.
//!
//! ```text
//! WalletConnector ──signer──▶ Contract<I> ──send──▶ PendingTransaction ──wait──▶ receipt
//!        │                         │
//!        └── WalletProvider ◀──────┘  (JsonRpcProvider, or MockProvider in tests)
//! ```
//!
//! [`submission::PolicySubmitter`] strings these together to deploy a new
//! wind-farm policy and hand back a [`contracts::DeployedPolicyHandle`].

pub mod contracts;
pub mod error;
pub mod provider;
pub mod submission;
pub mod types;
pub mod wallet;

#[cfg(any(test, feature = "testutils"))]
pub mod mock;

// Re-export commonly used types from root for convenience
pub use contracts::{ConfirmationPolicy, DeployedPolicyHandle, DeployerContract, PendingTransaction};
pub use error::{ChainError, FailureKind, SubmissionError};
pub use provider::{JsonRpcProvider, WalletProvider};
pub use submission::PolicySubmitter;
pub use wallet::{Signer, WalletConnector, WalletStatus};
