//! JSON-RPC wire types shared by providers and contracts.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Transaction or call object for `eth_call` / `eth_sendTransaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
}

impl TransactionRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            from: None,
            to,
            value: None,
            data: data.into(),
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Attach call value; zero is left off the request.
    pub fn value(mut self, value: Option<U256>) -> Self {
        self.value = value.filter(|v| !v.is_zero());
        self
    }

    /// 4-byte function selector, if the calldata carries one.
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }
}

/// Subset of `eth_getTransactionReceipt` the confirmation logic needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` success, `0` reverted. Absent on pre-Byzantium chains.
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U256>,
}

impl TransactionReceipt {
    /// Block the transaction was included in, once mined.
    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }

    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| s == U64::from(1))
    }

    /// Blocks on top of the inclusion block, counting it, at chain head `head`.
    pub fn confirmations_at(&self, head: u64) -> u64 {
        match self.block() {
            Some(mined) if head >= mined => head - mined + 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case_hex() {
        let to = Address::with_last_byte(0xaa);
        let tx = TransactionRequest::new(to, vec![0x12, 0x34, 0x56, 0x78])
            .from(Address::with_last_byte(0x01))
            .value(Some(U256::from(16)));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["data"], "0x12345678");
        assert_eq!(json["value"], "0x10");
        assert!(json["from"].is_string());
    }

    #[test]
    fn test_zero_value_omitted() {
        let tx = TransactionRequest::new(Address::ZERO, Vec::new()).value(Some(U256::ZERO));
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("value").is_none());
        assert!(json.get("from").is_none());
        assert_eq!(tx.selector(), None);
    }

    #[test]
    fn test_receipt_deserializes_node_json() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x1",
            "gasUsed": "0x5208",
            "logs": [],
        }))
        .unwrap();
        assert_eq!(receipt.block(), Some(16));
        assert!(receipt.succeeded());
        assert_eq!(receipt.confirmations_at(16), 1);
        assert_eq!(receipt.confirmations_at(18), 3);
    }

    #[test]
    fn test_failed_receipt() {
        let receipt: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "cd".repeat(32)),
            "blockNumber": "0x2",
            "status": "0x0",
        }))
        .unwrap();
        assert!(!receipt.succeeded());
    }
}
