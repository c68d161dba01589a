//! # Pending Transactions
//!
//! A broadcast transaction and the wait for it to reach a confirmation depth.
//!
//! The wait polls `eth_getTransactionReceipt` and `eth_blockNumber` every
//! `poll_interval` and gives up after `timeout`, reporting
//! [`ChainError::Timeout`]. A mined receipt with status `0` ends the wait
//! immediately with [`ChainError::Reverted`].

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::B256;
use lib_core::Config;
use tracing::{debug, info, warn};

use crate::error::ChainError;
use crate::provider::WalletProvider;
use crate::types::{TransactionReceipt, TransactionRequest};

/// How long and how deep to wait for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Blocks required, counting the inclusion block
    pub confirmations: u64,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl ConfirmationPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            confirmations: config.confirmations,
            timeout: config.confirmation_timeout(),
            poll_interval: config.receipt_poll_interval(),
        }
    }

    pub fn with_confirmations(self, confirmations: u64) -> Self {
        Self { confirmations, ..self }
    }
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Handle to a transaction the wallet has broadcast.
pub struct PendingTransaction {
    hash: B256,
    request: TransactionRequest,
    provider: Arc<dyn WalletProvider>,
}

impl std::fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("hash", &self.hash)
            .field("to", &self.request.to)
            .finish()
    }
}

impl PendingTransaction {
    pub fn new(hash: B256, request: TransactionRequest, provider: Arc<dyn WalletProvider>) -> Self {
        Self { hash, request, provider }
    }

    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Wait until the transaction has `policy.confirmations` blocks.
    pub async fn wait(self, policy: &ConfirmationPolicy) -> Result<TransactionReceipt, ChainError> {
        let hash = self.hash;
        match tokio::time::timeout(policy.timeout, self.poll(policy)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(tx_hash = %hash, timeout_secs = policy.timeout.as_secs(), "Confirmation timed out");
                Err(ChainError::Timeout(policy.timeout))
            }
        }
    }

    async fn poll(&self, policy: &ConfirmationPolicy) -> Result<TransactionReceipt, ChainError> {
        let required = policy.confirmations.max(1);

        loop {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                if receipt.block().is_some() {
                    if !receipt.succeeded() {
                        return Err(self.revert_error().await);
                    }

                    let head = self.provider.block_number().await?;
                    let confirmations = receipt.confirmations_at(head);
                    debug!(tx_hash = %self.hash, confirmations, required, "Receipt found");
                    if confirmations >= required {
                        info!(tx_hash = %self.hash, block = ?receipt.block(), "Transaction confirmed");
                        return Ok(receipt);
                    }
                }
            }

            tokio::time::sleep(policy.poll_interval).await;
        }
    }

    /// Replay the transaction as a call to recover the revert reason.
    ///
    /// Runs against the latest state, so the reason can differ if the
    /// contract changed since inclusion.
    async fn revert_error(&self) -> ChainError {
        match self.provider.call(&self.request).await {
            Err(err @ ChainError::Reverted { .. }) => err,
            _ => ChainError::Reverted {
                reason: None,
                data: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use alloy_primitives::Address;

    fn fast_policy() -> ConfirmationPolicy {
        ConfirmationPolicy {
            confirmations: 1,
            timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(5),
        }
    }

    async fn broadcast(mock: &Arc<MockProvider>) -> PendingTransaction {
        let tx = TransactionRequest::new(Address::repeat_byte(0x01), vec![0xaa, 0xbb, 0xcc, 0xdd]);
        let hash = mock.send_transaction(&tx).await.unwrap();
        PendingTransaction::new(hash, tx, mock.clone())
    }

    #[tokio::test]
    async fn test_waits_for_receipt() {
        let mock = Arc::new(MockProvider::new());
        let pending = broadcast(&mock).await;
        let hash = pending.hash();

        let receipt = pending.wait(&fast_policy()).await.unwrap();
        assert_eq!(receipt.transaction_hash, hash);
        assert!(receipt.succeeded());
    }

    #[tokio::test]
    async fn test_debug_shows_hash_and_target() {
        let mock = Arc::new(MockProvider::new());
        let pending = broadcast(&mock).await;

        let shown = format!("{:?}", pending);
        assert!(shown.contains(&format!("{:?}", pending.hash())));
        assert!(shown.contains("to"));
    }

    #[tokio::test]
    async fn test_waits_for_depth() {
        // Head advances one block per eth_blockNumber poll.
        let mock = Arc::new(MockProvider::new().with_advancing_head());
        let pending = broadcast(&mock).await;

        let receipt = pending.wait(&fast_policy().with_confirmations(3)).await.unwrap();
        let mined = receipt.block().unwrap();
        assert!(mock.head() >= mined + 2);
    }

    #[tokio::test]
    async fn test_unmined_transaction_times_out() {
        let mock = Arc::new(MockProvider::new().without_mining());
        let pending = broadcast(&mock).await;

        let err = pending.wait(&fast_policy()).await.unwrap_err();
        assert_eq!(err, ChainError::Timeout(Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn test_failed_receipt_recovers_reason() {
        let mock = Arc::new(MockProvider::new().with_failed_receipts());
        mock.respond_to(
            [0xaa, 0xbb, 0xcc, 0xdd],
            Err(ChainError::Reverted {
                reason: Some("Premium already paid".to_string()),
                data: None,
            }),
        );
        let pending = broadcast(&mock).await;

        let err = pending.wait(&fast_policy()).await.unwrap_err();
        assert!(matches!(err, ChainError::Reverted { reason: Some(r), .. } if r == "Premium already paid"));
    }

    #[tokio::test]
    async fn test_failed_receipt_without_reason() {
        let mock = Arc::new(MockProvider::new().with_failed_receipts());
        let pending = broadcast(&mock).await;

        let err = pending.wait(&fast_policy()).await.unwrap_err();
        assert_eq!(err, ChainError::Reverted { reason: None, data: None });
    }
}
