//! # Wallet Connector
//!
//! Tracks whether a wallet is connected and hands out a [`Signer`] bound to
//! the selected account.
//!
//! ## Connection lifecycle
//!
//! ```text
//! Disconnected ──connect()──▶ Connecting ──accounts──▶ Connected(addr)
//!       ▲                          │
//!       │                          └──failure──▶ Error(msg)
//!       └──────── disconnect() ◀──────────────────────┘
//! ```
//!
//! The connector is cheap to clone; clones share the provider but carry their
//! own status snapshot, so a background task can be given the connector as it
//! was when the user clicked.

use std::fmt;
use std::sync::Arc;

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::contracts::PendingTransaction;
use crate::error::ChainError;
use crate::provider::WalletProvider;
use crate::types::TransactionRequest;

/// Wallet connection status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletStatus {
    /// Not connected
    Disconnected,
    /// Account request in flight
    Connecting,
    /// Connected with the selected account
    Connected(Address),
    /// Last connection attempt failed
    Error(String),
}

impl WalletStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletStatus::Connected(_))
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            WalletStatus::Connected(addr) => Some(*addr),
            _ => None,
        }
    }
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletStatus::Disconnected => write!(f, "Disconnected"),
            WalletStatus::Connecting => write!(f, "Connecting..."),
            WalletStatus::Connected(addr) => write!(f, "Connected: {}", short_address(addr)),
            WalletStatus::Error(msg) => write!(f, "Wallet error: {}", msg),
        }
    }
}

/// `0x6033…6AC3` style display form.
pub fn short_address(addr: &Address) -> String {
    let full = addr.to_string();
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Account-bound handle that can send transactions.
#[derive(Clone)]
pub struct Signer {
    address: Address,
    provider: Arc<dyn WalletProvider>,
}

impl Signer {
    pub fn new(address: Address, provider: Arc<dyn WalletProvider>) -> Self {
        Self { address, provider }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::clone(&self.provider)
    }

    /// Broadcast `tx` from this account.
    pub async fn send_transaction(&self, tx: TransactionRequest) -> Result<PendingTransaction, ChainError> {
        let tx = tx.from(self.address);
        let hash = self.provider.send_transaction(&tx).await?;
        info!(tx_hash = %hash, to = %tx.to, "Transaction broadcast");
        Ok(PendingTransaction::new(hash, tx, self.provider()))
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("address", &self.address).finish()
    }
}

/// Connection state over a [`WalletProvider`].
#[derive(Clone)]
pub struct WalletConnector {
    provider: Arc<dyn WalletProvider>,
    status: WalletStatus,
    chain_id: Option<u64>,
}

impl WalletConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            status: WalletStatus::Disconnected,
            chain_id: None,
        }
    }

    /// Request accounts and select the first one.
    pub async fn connect(&mut self) -> Result<Address, ChainError> {
        self.status = WalletStatus::Connecting;

        match self.select_account().await {
            Ok((account, chain_id)) => {
                info!(%account, chain_id, "Wallet connected");
                self.status = WalletStatus::Connected(account);
                self.chain_id = Some(chain_id);
                Ok(account)
            }
            Err(e) => {
                warn!(error = %e, "Wallet connection failed");
                self.status = WalletStatus::Error(e.to_string());
                self.chain_id = None;
                Err(e)
            }
        }
    }

    async fn select_account(&self) -> Result<(Address, u64), ChainError> {
        let accounts = self.provider.request_accounts().await?;
        let account = accounts
            .first()
            .copied()
            .ok_or_else(|| ChainError::NoSigner("wallet exposed no accounts".to_string()))?;
        let chain_id = self.provider.chain_id().await?;
        Ok((account, chain_id))
    }

    pub fn disconnect(&mut self) {
        if self.status.is_connected() {
            info!("Wallet disconnected");
        }
        self.status = WalletStatus::Disconnected;
        self.chain_id = None;
    }

    /// Record a connection result obtained elsewhere, e.g. on a background task.
    pub fn set_status(&mut self, status: WalletStatus, chain_id: Option<u64>) {
        self.chain_id = if status.is_connected() { chain_id } else { None };
        self.status = status;
    }

    pub fn is_active(&self) -> bool {
        self.status.is_connected()
    }

    pub fn status(&self) -> &WalletStatus {
        &self.status
    }

    pub fn account(&self) -> Option<Address> {
        self.status.address()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::clone(&self.provider)
    }

    /// Signer for the connected account, `None` unless connected.
    pub fn signer(&self) -> Option<Signer> {
        self.account().map(|addr| Signer::new(addr, self.provider()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;

    #[tokio::test]
    async fn test_connect_selects_first_account() {
        let first = Address::repeat_byte(0x11);
        let mock = Arc::new(MockProvider::new().with_accounts(vec![first, Address::repeat_byte(0x22)]));
        let mut wallet = WalletConnector::new(mock);

        assert!(!wallet.is_active());
        assert!(wallet.signer().is_none());

        assert_eq!(wallet.connect().await.unwrap(), first);
        assert!(wallet.is_active());
        assert_eq!(wallet.signer().unwrap().address(), first);
        assert_eq!(wallet.chain_id(), Some(MockProvider::CHAIN_ID));
    }

    #[tokio::test]
    async fn test_connect_without_accounts_fails() {
        let mut wallet = WalletConnector::new(Arc::new(MockProvider::new()));
        let err = wallet.connect().await.unwrap_err();
        assert!(matches!(err, ChainError::NoSigner(_)));
        assert!(matches!(wallet.status(), WalletStatus::Error(_)));
        assert!(wallet.signer().is_none());
    }

    #[tokio::test]
    async fn test_disconnect_drops_signer() {
        let mock = Arc::new(MockProvider::new().with_accounts(vec![Address::repeat_byte(0x11)]));
        let mut wallet = WalletConnector::new(mock);
        wallet.connect().await.unwrap();
        wallet.disconnect();
        assert_eq!(wallet.status(), &WalletStatus::Disconnected);
        assert!(wallet.signer().is_none());
    }

    #[test]
    fn test_status_display_shortens_address() {
        let status = WalletStatus::Connected(Address::repeat_byte(0xab));
        assert_eq!(status.to_string().to_lowercase(), "connected: 0xabab…abab");
    }
}
