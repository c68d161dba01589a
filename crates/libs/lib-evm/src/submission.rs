//! # Policy Submission Flow
//!
//! Deploys a new wind-farm policy through the deployer contract and returns
//! a handle to the policy contract it created.
//!
//! ## Steps
//!
//! 1. Take a signer from the connected wallet; fail with
//!    [`SubmissionError::NotConnected`] before any chain access otherwise.
//! 2. Bind the deployer proxy at the configured address.
//! 3. Send `newWindFarm(...)` with the signer's address as the client.
//! 4. Wait for the confirmation depth, bounded by the confirmation timeout.
//! 5. Read `getDeployedPolicies()`.
//! 6. Take the last address; an empty list or the zero address is an
//!    integrity failure.
//!
//! Any failure in steps 5 and 6 is an integrity failure carrying the
//! deployment hash: the policy was created, so the attempt must not be
//! repeated.
//! 7. Bind a [`DeployedPolicyHandle`] at that address with the same signer.
//!
//! The read in step 5 is a future, so its result only exists once awaited;
//! the handle can never be built from a list that has not arrived.

use alloy_primitives::{Address, U256};
use lib_core::{Config, PolicyParameters};
use tracing::{info, instrument, warn};

use crate::contracts::{ConfirmationPolicy, DeployedPolicyHandle, DeployerContract};
use crate::error::SubmissionError;
use crate::wallet::WalletConnector;

/// Submits new policies to one deployer contract.
#[derive(Debug, Clone)]
pub struct PolicySubmitter {
    deployer_address: Address,
    confirmation: ConfirmationPolicy,
    attach_value: bool,
}

impl PolicySubmitter {
    pub fn new(deployer_address: Address, confirmation: ConfirmationPolicy) -> Self {
        Self {
            deployer_address,
            confirmation,
            attach_value: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            deployer_address: config.deployer_address,
            confirmation: ConfirmationPolicy::from_config(config),
            attach_value: config.attach_value,
        }
    }

    /// Send the policy amount as call value with `newWindFarm`.
    pub fn attach_value(mut self, attach: bool) -> Self {
        self.attach_value = attach;
        self
    }

    pub fn deployer_address(&self) -> Address {
        self.deployer_address
    }

    pub fn confirmation(&self) -> &ConfirmationPolicy {
        &self.confirmation
    }

    /// Deploy a policy with `params` and return a handle to it.
    #[instrument(skip_all, fields(deployer = %self.deployer_address, duration_days = params.duration_days))]
    pub async fn submit_new_policy(
        &self,
        wallet: &WalletConnector,
        params: &PolicyParameters,
    ) -> Result<DeployedPolicyHandle, SubmissionError> {
        let signer = wallet.signer().ok_or(SubmissionError::NotConnected)?;
        let client = signer.address();
        let deployer = DeployerContract::new(self.deployer_address, signer.clone());

        let value: Option<U256> = self.attach_value.then_some(params.amount);
        let pending = deployer.new_wind_farm(params, client, value).await?;
        let tx_hash = pending.hash();
        info!(%tx_hash, %client, "newWindFarm submitted");

        let receipt = pending
            .wait(&self.confirmation)
            .await
            .map_err(|e| SubmissionError::from(e).with_tx_hash(tx_hash))?;
        info!(%tx_hash, block = ?receipt.block(), "newWindFarm confirmed");

        // The policy exists on chain from here on; nothing below is retryable.
        let policies = deployer.deployed_policies().await.map_err(|e| {
            warn!(%tx_hash, error = %e, "Deployed policies read failed after confirmation");
            SubmissionError::integrity(format!("reading deployed policies failed: {}", e)).with_tx_hash(tx_hash)
        })?;
        let address = latest_policy(&policies).map_err(|e| e.with_tx_hash(tx_hash))?;

        info!(policy = %address, total = policies.len(), "Policy deployed");
        Ok(DeployedPolicyHandle::new(address, signer, tx_hash))
    }
}

/// The most recently deployed policy is last in the deployer's list.
fn latest_policy(policies: &[Address]) -> Result<Address, SubmissionError> {
    match policies.last() {
        None => {
            warn!("Deployer returned an empty policy list after confirmation");
            Err(SubmissionError::integrity("deployer returned no policies"))
        }
        Some(address) if *address == Address::ZERO => {
            warn!("Deployer returned the zero address as latest policy");
            Err(SubmissionError::integrity("latest policy is the zero address"))
        }
        Some(address) => Ok(*address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::abi::IWindFarmPolicyDeployer;
    use crate::error::{ChainError, FailureKind};
    use crate::mock::{encode_policies, MockCall, MockProvider};
    use alloy_sol_types::SolCall;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const DEPLOYER: Address = Address::new([0xde; 20]);
    const ACCOUNT: Address = Address::new([0x11; 20]);
    const POLICY_A: Address = Address::new([0xaa; 20]);
    const POLICY_B: Address = Address::new([0xbb; 20]);

    fn submitter() -> PolicySubmitter {
        PolicySubmitter::new(
            DEPLOYER,
            ConfirmationPolicy {
                confirmations: 1,
                timeout: Duration::from_millis(300),
                poll_interval: Duration::from_millis(5),
            },
        )
    }

    async fn connected(mock: MockProvider) -> (Arc<MockProvider>, WalletConnector) {
        let mock = Arc::new(mock.with_accounts(vec![ACCOUNT]));
        let mut wallet = WalletConnector::new(mock.clone());
        wallet.connect().await.unwrap();
        (mock, wallet)
    }

    #[tokio::test]
    async fn test_not_connected_touches_nothing() {
        let mock = Arc::new(MockProvider::new().with_deployed_policies(vec![POLICY_A]));
        let wallet = WalletConnector::new(mock.clone());

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();

        assert_eq!(err, SubmissionError::NotConnected);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_returns_last_deployed_policy() {
        let (mock, wallet) = connected(MockProvider::new().with_deployed_policies(vec![POLICY_A, POLICY_B])).await;

        let handle = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap();

        assert_eq!(handle.address(), POLICY_B);
        assert_eq!(handle.owner(), Some(ACCOUNT));
        assert_eq!(mock.sent_transactions().len(), 1);
        assert_eq!(mock.sent_transactions()[0].to, DEPLOYER);
    }

    #[tokio::test]
    async fn test_read_happens_after_confirmation() {
        let (mock, wallet) = connected(MockProvider::new().with_deployed_policies(vec![POLICY_A])).await;

        submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap();

        let calls = mock.calls();
        let confirmed = calls
            .iter()
            .position(|c| matches!(c, MockCall::BlockNumber))
            .unwrap();
        let read = calls
            .iter()
            .position(|c| matches!(c, MockCall::Call { .. }))
            .unwrap();
        assert!(read > confirmed);
    }

    #[tokio::test]
    async fn test_delayed_read_resolves_to_its_result() {
        let (mock, wallet) = connected(MockProvider::new()).await;
        mock.respond_to_after(
            IWindFarmPolicyDeployer::getDeployedPoliciesCall::SELECTOR,
            Ok(encode_policies(vec![POLICY_A, POLICY_B])),
            Duration::from_millis(50),
        );

        let started = Instant::now();
        let handle = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(handle.address(), POLICY_B);
    }

    #[tokio::test]
    async fn test_wallet_rejection_skips_read() {
        let mock = MockProvider::new()
            .with_deployed_policies(vec![POLICY_A])
            .with_send_failure(ChainError::UserRejected("User denied transaction signature.".into()));
        let (mock, wallet) = connected(mock).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Declined);
        assert!(err.is_retryable());
        assert!(!mock.calls().iter().any(|c| matches!(c, MockCall::Call { .. })));
    }

    #[tokio::test]
    async fn test_empty_list_is_integrity_failure() {
        let (_mock, wallet) = connected(MockProvider::new().with_deployed_policies(vec![])).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Integrity);
    }

    #[tokio::test]
    async fn test_zero_address_is_integrity_failure() {
        let (_mock, wallet) =
            connected(MockProvider::new().with_deployed_policies(vec![POLICY_A, Address::ZERO])).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Integrity);
    }

    #[tokio::test]
    async fn test_malformed_list_is_integrity_failure() {
        let (mock, wallet) = connected(MockProvider::new()).await;
        mock.respond_to(
            IWindFarmPolicyDeployer::getDeployedPoliciesCall::SELECTOR,
            Ok(vec![0xff; 7].into()),
        );

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Integrity);
    }

    #[tokio::test]
    async fn test_read_failure_after_confirmation_is_not_retryable() {
        let (mock, wallet) = connected(MockProvider::new()).await;
        mock.respond_to(
            IWindFarmPolicyDeployer::getDeployedPoliciesCall::SELECTOR,
            Err(ChainError::Transport("connection reset".to_string())),
        );

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();

        assert_eq!(mock.sent_transactions().len(), 1);
        assert_eq!(err.kind(), FailureKind::Integrity);
        assert!(!err.is_retryable());
        assert!(err.tx_hash().is_some());
    }

    #[tokio::test]
    async fn test_empty_list_carries_deployment_hash() {
        let (_mock, wallet) = connected(MockProvider::new().with_deployed_policies(vec![])).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert!(err.tx_hash().is_some());
    }

    #[tokio::test]
    async fn test_revert_reason_surfaced() {
        let mock = MockProvider::new().with_send_failure(ChainError::Reverted {
            reason: Some("Policy amount below minimum".to_string()),
            data: None,
        });
        let (_mock, wallet) = connected(mock).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Reverted {
                reason: Some("Policy amount below minimum".to_string()),
                tx_hash: None,
            }
        );
        assert!(err.user_message().contains("Policy amount below minimum"));
    }

    #[tokio::test]
    async fn test_mined_revert_carries_tx_hash() {
        let (mock, wallet) = connected(MockProvider::new().with_failed_receipts()).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Reverted);
        assert!(err.tx_hash().is_some());
        assert_eq!(mock.sent_transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_timeout_is_transient() {
        let (_mock, wallet) = connected(MockProvider::new().without_mining()).await;

        let err = submitter()
            .submit_new_policy(&wallet, &PolicyParameters::preset())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Timeout { tx_hash: Some(_), .. }));
        assert_eq!(err.kind(), FailureKind::Transient);
    }

    #[tokio::test]
    async fn test_attach_value_sends_amount() {
        let (mock, wallet) = connected(MockProvider::new().with_deployed_policies(vec![POLICY_A])).await;
        let params = PolicyParameters::preset();

        submitter()
            .attach_value(true)
            .submit_new_policy(&wallet, &params)
            .await
            .unwrap();
        assert_eq!(mock.sent_transactions()[0].value, Some(params.amount));
    }

    #[test]
    fn test_latest_policy_selection() {
        assert_eq!(latest_policy(&[POLICY_A, POLICY_B]).unwrap(), POLICY_B);
        assert!(latest_policy(&[]).is_err());
        assert!(latest_policy(&[Address::ZERO]).is_err());
    }
}
