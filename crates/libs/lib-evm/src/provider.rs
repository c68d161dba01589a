//! # Wallet Provider
//!
//! [`WalletProvider`] is the seam between this crate and whatever holds the
//! user's keys: an EIP-1193 style endpoint that answers account requests,
//! signs and broadcasts transactions, and serves reads.
//!
//! [`JsonRpcProvider`] speaks JSON-RPC 2.0 over HTTP, which covers a local
//! node with unlocked accounts as well as signer proxies in front of a
//! hardware or browser wallet.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_evm::{JsonRpcProvider, WalletProvider};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), lib_evm::ChainError> {
//! let provider = JsonRpcProvider::new("http://127.0.0.1:8545", Duration::from_secs(10))?;
//! let accounts = provider.request_accounts().await?;
//! println!("{} account(s), chain {}", accounts.len(), provider.chain_id().await?);
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U64};
use async_trait::async_trait;
use lib_core::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{ChainError, RpcErrorObject};
use crate::types::{TransactionReceipt, TransactionRequest};

/// Wallet provider capabilities the dashboard relies on.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to expose its accounts (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<Address>, ChainError>;

    /// Accounts already exposed, without prompting (`eth_accounts`).
    async fn accounts(&self) -> Result<Vec<Address>, ChainError>;

    async fn chain_id(&self) -> Result<u64, ChainError>;

    async fn block_number(&self) -> Result<u64, ChainError>;

    /// Read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ChainError>;

    /// Sign and broadcast; resolves once the wallet returns the hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError>;

    /// `None` while the transaction is still pending.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, ChainError>;
}

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

/// JSON-RPC 2.0 provider over HTTP.
pub struct JsonRpcProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ChainError> {
        Self::new(config.rpc_url.clone(), config.rpc_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<P, R>(&self, method: &str, params: P) -> Result<R, ChainError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "JSON-RPC request");

        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(method, %status, "JSON-RPC endpoint returned HTTP error");
            return Err(ChainError::Transport(format!("HTTP {} from {}", status, self.url)));
        }

        let response: RpcResponse = response.json().await?;
        if let Some(error) = response.error {
            debug!(method, code = error.code, message = %error.message, "JSON-RPC error");
            return Err(error.into());
        }

        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .map_err(|e| ChainError::Decode(format!("{} result: {}", method, e)))
    }
}

#[async_trait]
impl WalletProvider for JsonRpcProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.request("eth_requestAccounts", json!([])).await
    }

    async fn accounts(&self) -> Result<Vec<Address>, ChainError> {
        self.request("eth_accounts", json!([])).await
    }

    async fn chain_id(&self) -> Result<u64, ChainError> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        let number: U64 = self.request("eth_blockNumber", json!([])).await?;
        Ok(number.to::<u64>())
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, ChainError> {
        self.request("eth_call", json!([tx, "latest"])).await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, ChainError> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, ChainError> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    /// Serve `respond(method, params)` as JSON-RPC results on a random local port.
    async fn spawn_node(respond: fn(&str, &Value) -> Value) -> String {
        let app = Router::new().route(
            "/",
            post(move |Json(body): Json<Value>| async move {
                let method = body["method"].as_str().unwrap_or_default().to_string();
                let mut reply = respond(&method, &body["params"]);
                reply["jsonrpc"] = json!("2.0");
                reply["id"] = body["id"].clone();
                Json(reply)
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn provider(url: String) -> JsonRpcProvider {
        JsonRpcProvider::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_accounts_and_chain_id() {
        let url = spawn_node(|method, _| match method {
            "eth_requestAccounts" => json!({ "result": [format!("0x{}", "11".repeat(20))] }),
            "eth_chainId" => json!({ "result": "0xaa36a7" }),
            "eth_blockNumber" => json!({ "result": "0x1b4" }),
            _ => json!({ "error": { "code": -32601, "message": "method not found" } }),
        })
        .await;
        let provider = provider(url);

        let accounts = provider.request_accounts().await.unwrap();
        assert_eq!(accounts, vec![Address::repeat_byte(0x11)]);
        assert_eq!(provider.chain_id().await.unwrap(), 11_155_111);
        assert_eq!(provider.block_number().await.unwrap(), 436);
    }

    #[tokio::test]
    async fn test_send_transaction_passes_call_object() {
        let url = spawn_node(|method, params| match method {
            "eth_sendTransaction" if params[0]["data"] == "0xdeadbeef" => {
                json!({ "result": format!("0x{}", "ab".repeat(32)) })
            }
            _ => json!({ "error": { "code": -32602, "message": "invalid params" } }),
        })
        .await;

        let tx = TransactionRequest::new(Address::repeat_byte(0x22), vec![0xde, 0xad, 0xbe, 0xef])
            .from(Address::repeat_byte(0x11));
        let hash = provider(url).send_transaction(&tx).await.unwrap();
        assert_eq!(hash, B256::repeat_byte(0xab));
    }

    #[tokio::test]
    async fn test_wallet_rejection_maps_to_user_rejected() {
        let url = spawn_node(|_, _| {
            json!({ "error": { "code": 4001, "message": "User denied transaction signature." } })
        })
        .await;

        let tx = TransactionRequest::new(Address::repeat_byte(0x22), Vec::new());
        let err = provider(url).send_transaction(&tx).await.unwrap_err();
        assert!(matches!(err, ChainError::UserRejected(_)));
    }

    #[tokio::test]
    async fn test_pending_receipt_is_none() {
        let url = spawn_node(|_, _| json!({ "result": null })).await;
        let receipt = provider(url).transaction_receipt(B256::ZERO).await.unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn test_malformed_result_is_decode_error() {
        let url = spawn_node(|_, _| json!({ "result": "not-an-address-list" })).await;
        let err = provider(url).accounts().await.unwrap_err();
        assert!(matches!(err, ChainError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_node_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(format!("http://{}", addr)).block_number().await.unwrap_err();
        assert!(matches!(err, ChainError::Transport(_)));
    }
}
