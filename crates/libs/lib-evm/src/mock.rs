//! # Mock Provider
//!
//! In-memory [`WalletProvider`] for tests. Enabled inside this crate's own
//! tests and for dependents through the `testutils` feature.
//!
//! Sent transactions are "mined" into the next block immediately unless
//! [`MockProvider::without_mining`] is used. Reads are answered by function
//! selector from scripted responses. Every request is recorded in order.

use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::contracts::abi::{IInsureWindFarm, IWindFarmPolicyDeployer};
use crate::error::ChainError;
use crate::provider::WalletProvider;
use crate::types::{TransactionReceipt, TransactionRequest};

/// One recorded provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    RequestAccounts,
    Accounts,
    ChainId,
    BlockNumber,
    Call { to: Address, selector: Option<[u8; 4]> },
    SendTransaction { to: Address, selector: Option<[u8; 4]> },
    TransactionReceipt(B256),
}

#[derive(Clone)]
struct ScriptedRead {
    result: Result<Bytes, ChainError>,
    delay: Option<Duration>,
}

struct MockState {
    accounts: Vec<Address>,
    head: u64,
    advancing_head: bool,
    mining: bool,
    receipt_status: u64,
    send_failure: Option<ChainError>,
    send_delay: Option<Duration>,
    reads: HashMap<[u8; 4], ScriptedRead>,
    receipts: HashMap<B256, TransactionReceipt>,
    sent: Vec<TransactionRequest>,
    log: Vec<MockCall>,
}

pub struct MockProvider {
    state: Mutex<MockState>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Sepolia.
    pub const CHAIN_ID: u64 = 11_155_111;

    pub const GENESIS_HEAD: u64 = 100;

    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                accounts: Vec::new(),
                head: Self::GENESIS_HEAD,
                advancing_head: false,
                mining: true,
                receipt_status: 1,
                send_failure: None,
                send_delay: None,
                reads: HashMap::new(),
                receipts: HashMap::new(),
                sent: Vec::new(),
                log: Vec::new(),
            }),
        }
    }

    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        self.state.lock().accounts = accounts;
        self
    }

    /// Each `eth_blockNumber` moves the head forward one block first.
    pub fn with_advancing_head(self) -> Self {
        self.state.lock().advancing_head = true;
        self
    }

    /// Sent transactions never get a receipt.
    pub fn without_mining(self) -> Self {
        self.state.lock().mining = false;
        self
    }

    /// Mined receipts carry status `0`.
    pub fn with_failed_receipts(self) -> Self {
        self.state.lock().receipt_status = 0;
        self
    }

    /// `eth_sendTransaction` fails with `err` without broadcasting.
    pub fn with_send_failure(self, err: ChainError) -> Self {
        self.state.lock().send_failure = Some(err);
        self
    }

    /// `eth_sendTransaction` takes `delay` to return, like a wallet prompt.
    pub fn with_send_delay(self, delay: Duration) -> Self {
        self.state.lock().send_delay = Some(delay);
        self
    }

    /// Script `getDeployedPolicies()`.
    pub fn with_deployed_policies(self, policies: Vec<Address>) -> Self {
        self.respond_to(
            IWindFarmPolicyDeployer::getDeployedPoliciesCall::SELECTOR,
            Ok(encode_policies(policies)),
        );
        self
    }

    /// Script `getLatestWindSpeed()`, in tenths of km/h.
    pub fn with_wind_speed(self, tenths_kmh: u64) -> Self {
        let encoded = IInsureWindFarm::getLatestWindSpeedCall::abi_encode_returns(&(U256::from(tenths_kmh),));
        self.respond_to(IInsureWindFarm::getLatestWindSpeedCall::SELECTOR, Ok(encoded.into()));
        self
    }

    /// Answer `eth_call`s to `selector` with `result`.
    pub fn respond_to(&self, selector: [u8; 4], result: Result<Bytes, ChainError>) {
        self.state
            .lock()
            .reads
            .insert(selector, ScriptedRead { result, delay: None });
    }

    /// Like [`Self::respond_to`], resolving only after `delay`.
    pub fn respond_to_after(&self, selector: [u8; 4], result: Result<Bytes, ChainError>, delay: Duration) {
        self.state.lock().reads.insert(
            selector,
            ScriptedRead {
                result,
                delay: Some(delay),
            },
        );
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().log.clone()
    }

    /// Transactions successfully broadcast so far.
    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.state.lock().sent.clone()
    }

    /// Number of `eth_sendTransaction` requests, failed ones included.
    pub fn send_attempts(&self) -> usize {
        self.state
            .lock()
            .log
            .iter()
            .filter(|c| matches!(c, MockCall::SendTransaction { .. }))
            .count()
    }

    pub fn head(&self) -> u64 {
        self.state.lock().head
    }

    fn record(&self, call: MockCall) {
        self.state.lock().log.push(call);
    }
}

/// ABI-encode a `getDeployedPolicies()` return value.
pub fn encode_policies(policies: Vec<Address>) -> Bytes {
    IWindFarmPolicyDeployer::getDeployedPoliciesCall::abi_encode_returns(&(policies,)).into()
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.record(MockCall::RequestAccounts);
        Ok(self.state.lock().accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.record(MockCall::Accounts);
        Ok(self.state.lock().accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.record(MockCall::ChainId);
        Ok(Self::CHAIN_ID)
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        self.record(MockCall::BlockNumber);
        let mut state = self.state.lock();
        if state.advancing_head {
            state.head += 1;
        }
        Ok(state.head)
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ChainError> {
        let selector = tx.selector();
        self.record(MockCall::Call { to: tx.to, selector });

        let scripted = selector.and_then(|s| self.state.lock().reads.get(&s).cloned());
        let Some(read) = scripted else {
            return Err(ChainError::Rpc {
                code: -32000,
                message: "mock: no response scripted for call".to_string(),
            });
        };

        if let Some(delay) = read.delay {
            tokio::time::sleep(delay).await;
        }
        read.result
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError> {
        self.record(MockCall::SendTransaction {
            to: tx.to,
            selector: tx.selector(),
        });

        let delay = self.state.lock().send_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        if let Some(err) = state.send_failure.clone() {
            return Err(err);
        }

        state.sent.push(tx.clone());
        let hash = B256::left_padding_from(&(state.sent.len() as u64).to_be_bytes());

        if state.mining {
            state.head += 1;
            let receipt = TransactionReceipt {
                transaction_hash: hash,
                block_number: Some(U64::from(state.head)),
                status: Some(U64::from(state.receipt_status)),
                gas_used: Some(U256::from(21_000)),
            };
            state.receipts.insert(hash, receipt);
        }
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, ChainError> {
        self.record(MockCall::TransactionReceipt(hash));
        Ok(self.state.lock().receipts.get(&hash).cloned())
    }
}
