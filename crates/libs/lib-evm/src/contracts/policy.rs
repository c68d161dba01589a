//! # Deployed Policy Handle
//!
//! Proxy for one deployed wind-farm policy, bound to the signer that
//! created it. Only [`crate::submission`] builds these, from an address the
//! deployer actually returned.

use alloy_primitives::{Address, B256, U256};

use super::abi::{IInsureWindFarm, Policy};
use super::{ConfirmationPolicy, Contract};
use crate::error::ChainError;
use crate::types::TransactionReceipt;
use crate::wallet::Signer;

#[derive(Clone)]
pub struct DeployedPolicyHandle {
    contract: Contract<Policy>,
    deployment_tx: B256,
}

impl DeployedPolicyHandle {
    pub(crate) fn new(address: Address, signer: Signer, deployment_tx: B256) -> Self {
        Self {
            contract: Contract::with_signer(address, signer),
            deployment_tx,
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Transaction that created the policy.
    pub fn deployment_tx(&self) -> B256 {
        self.deployment_tx
    }

    pub fn owner(&self) -> Option<Address> {
        self.contract.signer().map(Signer::address)
    }

    /// Pay `premium` wei into the policy and wait for confirmation.
    pub async fn pay_premium(
        &self,
        premium: U256,
        confirmation: &ConfirmationPolicy,
    ) -> Result<TransactionReceipt, ChainError> {
        self.contract
            .send(&IInsureWindFarm::payPremiumCall {}, Some(premium))
            .await?
            .wait(confirmation)
            .await
    }

    /// Latest oracle wind speed, in tenths of km/h.
    pub async fn latest_wind_speed(&self) -> Result<u64, ChainError> {
        let ret = self.contract.call(&IInsureWindFarm::getLatestWindSpeedCall {}).await?;
        u64::try_from(ret.speed)
            .map_err(|_| ChainError::Decode(format!("wind speed {} out of range", ret.speed)))
    }

    /// Trigger an oracle refresh and payout check.
    pub async fn update_state(&self, confirmation: &ConfirmationPolicy) -> Result<TransactionReceipt, ChainError> {
        self.contract
            .send(&IInsureWindFarm::updateStateCall {}, None)
            .await?
            .wait(confirmation)
            .await
    }
}

impl std::fmt::Debug for DeployedPolicyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployedPolicyHandle")
            .field("address", &self.address())
            .field("deployment_tx", &self.deployment_tx)
            .finish()
    }
}
