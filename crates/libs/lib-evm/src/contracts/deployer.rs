//! Typed wrapper over the deployer contract.

use std::sync::Arc;

use alloy_primitives::{Address, U256};

use lib_core::PolicyParameters;

use super::abi::{Deployer, IWindFarmPolicyDeployer};
use super::{Contract, PendingTransaction};
use crate::error::ChainError;
use crate::provider::WalletProvider;
use crate::wallet::Signer;

/// Proxy for the wind-farm policy deployer.
#[derive(Clone)]
pub struct DeployerContract {
    contract: Contract<Deployer>,
}

impl DeployerContract {
    pub fn new(address: Address, signer: Signer) -> Self {
        Self {
            contract: Contract::with_signer(address, signer),
        }
    }

    pub fn read_only(address: Address, provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            contract: Contract::new(address, provider),
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Deploy a policy for `client`. `value` is attached as call value if set.
    pub async fn new_wind_farm(
        &self,
        params: &PolicyParameters,
        client: Address,
        value: Option<U256>,
    ) -> Result<PendingTransaction, ChainError> {
        let call = IWindFarmPolicyDeployer::newWindFarmCall {
            link: params.link_token,
            oracle: params.weather_oracle,
            amount: params.amount,
            client,
            duration: U256::from(params.duration_days),
            latitude: params.latitude.clone(),
            longitude: params.longitude.clone(),
        };
        self.contract.send(&call, value).await
    }

    /// Every policy this deployer has created, oldest first.
    pub async fn deployed_policies(&self) -> Result<Vec<Address>, ChainError> {
        let ret = self
            .contract
            .call(&IWindFarmPolicyDeployer::getDeployedPoliciesCall {})
            .await?;
        Ok(ret.policies)
    }

    /// Ask every deployed policy to refresh its oracle reading.
    pub async fn update_state_of_all_contracts(&self) -> Result<PendingTransaction, ChainError> {
        self.contract
            .send(&IWindFarmPolicyDeployer::updateStateOfAllContractsCall {}, None)
            .await
    }
}
