//! # Contract Gateway
//!
//! [`Contract<I>`] is a callable proxy for the contract at one address,
//! typed by an interface marker `I`. Reads go through the provider with
//! `eth_call`; writes need a [`Signer`] and return a [`PendingTransaction`].
//!
//! ```rust,ignore
//! let deployer = Contract::<Deployer>::with_signer(address, signer);
//! let policies = deployer.call(&getDeployedPoliciesCall {}).await?.policies;
//! ```
//!
//! Only call types registered with [`InterfaceFunction<I>`] are accepted, so
//! a policy function cannot be sent to the deployer by mistake.

pub mod abi;
pub mod deployer;
pub mod pending;
pub mod policy;

use std::marker::PhantomData;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::error::ChainError;
use crate::provider::WalletProvider;
use crate::types::TransactionRequest;
use crate::wallet::Signer;

pub use deployer::DeployerContract;
pub use pending::{ConfirmationPolicy, PendingTransaction};
pub use policy::DeployedPolicyHandle;

/// Contract interface marker.
pub trait ContractInterface: Send + Sync + 'static {
    const NAME: &'static str;
}

/// A function belonging to interface `I`.
pub trait InterfaceFunction<I: ContractInterface>: SolCall + Send + Sync {}

/// Proxy for the contract at `address` implementing interface `I`.
pub struct Contract<I> {
    address: Address,
    provider: Arc<dyn WalletProvider>,
    signer: Option<Signer>,
    _interface: PhantomData<I>,
}

impl<I> Clone for Contract<I> {
    fn clone(&self) -> Self {
        Self {
            address: self.address,
            provider: Arc::clone(&self.provider),
            signer: self.signer.clone(),
            _interface: PhantomData,
        }
    }
}

impl<I: ContractInterface> Contract<I> {
    /// Read-only proxy.
    pub fn new(address: Address, provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            address,
            provider,
            signer: None,
            _interface: PhantomData,
        }
    }

    /// Proxy that can also send transactions as `signer`.
    pub fn with_signer(address: Address, signer: Signer) -> Self {
        Self {
            address,
            provider: signer.provider(),
            signer: Some(signer),
            _interface: PhantomData,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> Option<&Signer> {
        self.signer.as_ref()
    }

    /// Run `call` with `eth_call` and decode its return values.
    pub async fn call<C: InterfaceFunction<I>>(&self, call: &C) -> Result<C::Return, ChainError> {
        debug!(
            contract = I::NAME,
            address = %self.address,
            function = C::SIGNATURE,
            selector = %hex::encode(C::SELECTOR),
            "eth_call"
        );

        let mut tx = TransactionRequest::new(self.address, call.abi_encode());
        if let Some(signer) = &self.signer {
            tx = tx.from(signer.address());
        }

        let output = self.provider.call(&tx).await?;
        C::abi_decode_returns(&output, true)
            .map_err(|e| ChainError::Decode(format!("{} returned malformed data: {}", C::SIGNATURE, e)))
    }

    /// Send `call` as a transaction, optionally carrying `value` wei.
    pub async fn send<C: InterfaceFunction<I>>(
        &self,
        call: &C,
        value: Option<U256>,
    ) -> Result<PendingTransaction, ChainError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ChainError::NoSigner(format!("{} on {} needs a signer", C::SIGNATURE, I::NAME))
        })?;

        debug!(
            contract = I::NAME,
            address = %self.address,
            function = C::SIGNATURE,
            selector = %hex::encode(C::SELECTOR),
            "send"
        );
        let tx = TransactionRequest::new(self.address, call.abi_encode()).value(value);
        signer.send_transaction(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::abi::{Deployer, IWindFarmPolicyDeployer, Policy, IInsureWindFarm};
    use super::*;
    use crate::mock::{MockCall, MockProvider};

    #[tokio::test]
    async fn test_call_decodes_returns() {
        let policies = vec![Address::repeat_byte(0xaa), Address::repeat_byte(0xbb)];
        let mock = Arc::new(MockProvider::new().with_deployed_policies(policies.clone()));
        let deployer = Contract::<Deployer>::new(Address::repeat_byte(0x01), mock);

        let ret = deployer
            .call(&IWindFarmPolicyDeployer::getDeployedPoliciesCall {})
            .await
            .unwrap();
        assert_eq!(ret.policies, policies);
    }

    #[tokio::test]
    async fn test_send_without_signer_fails_before_provider() {
        let mock = Arc::new(MockProvider::new());
        let policy = Contract::<Policy>::new(Address::repeat_byte(0x02), mock.clone());

        let err = policy
            .send(&IInsureWindFarm::payPremiumCall {}, Some(U256::from(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::NoSigner(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_encodes_selector_and_value() {
        let account = Address::repeat_byte(0x11);
        let mock = Arc::new(MockProvider::new().with_accounts(vec![account]));
        let signer = Signer::new(account, mock.clone());
        let policy = Contract::<Policy>::with_signer(Address::repeat_byte(0x02), signer);

        policy
            .send(&IInsureWindFarm::payPremiumCall {}, Some(U256::from(150)))
            .await
            .unwrap();

        let sent = mock.sent_transactions();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].selector(), Some(IInsureWindFarm::payPremiumCall::SELECTOR));
        assert_eq!(sent[0].from, Some(account));
        assert_eq!(sent[0].value, Some(U256::from(150)));
        assert!(matches!(mock.calls()[0], MockCall::SendTransaction { .. }));
    }

    #[tokio::test]
    async fn test_malformed_return_is_decode_error() {
        let mock = Arc::new(MockProvider::new());
        mock.respond_to(
            IInsureWindFarm::getLatestWindSpeedCall::SELECTOR,
            Ok(vec![0x01, 0x02].into()),
        );
        let policy = Contract::<Policy>::new(Address::repeat_byte(0x02), mock);

        let err = policy
            .call(&IInsureWindFarm::getLatestWindSpeedCall {})
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::Decode(_)));
    }
}
