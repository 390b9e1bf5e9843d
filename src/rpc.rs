//! Ledger JSON-RPC Connection
//!
//! This module owns the wire boundary to the remote ledger node: the JSON-RPC
//! envelope, the handful of methods the client needs (sendTransaction,
//! simulateTransaction, getAccountInfo, getLatestBlockhash,
//! getSignatureStatuses, getBalance), and decoding of base64 account data.
//!
//! The connection holds no mutable state beyond the HTTP connection pool and
//! may be shared freely across concurrent calls.

use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use tracing::debug;

use crate::error::{Error, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_COMMITMENT: &str = "confirmed";

// ============================================================================
// JSON-RPC TYPES
// ============================================================================

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    message: String,
}

/// Wrapper for responses of the form `{"context": ..., "value": ...}`.
#[derive(Debug, Deserialize)]
struct RpcContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
struct RpcAccount {
    data: (String, String),
    lamports: u64,
    owner: String,
}

/// Result of a preflight simulation, as reported by the node.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// The program's error value, or `None` when the dry run succeeded.
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub units_consumed: Option<u64>,
}

/// Per-signature status entry from getSignatureStatuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    #[serde(default)]
    pub slot: u64,
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

/// Decoded account state returned by the node.
#[derive(Debug, Clone)]
pub struct AccountData {
    pub lamports: u64,
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

// ============================================================================
// CONNECTION
// ============================================================================

/// Read-only handle to a remote ledger node.
#[derive(Debug, Clone)]
pub struct RpcConnection {
    client: Client,
    rpc_url: String,
    commitment: String,
}

impl RpcConnection {
    pub fn new(rpc_url: &str) -> Result<Self> {
        Self::with_timeout(rpc_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
            commitment: DEFAULT_COMMITMENT.to_string(),
        })
    }

    /// Sets the commitment level attached to queries and preflight
    /// (`processed`, `confirmed`, or `finalized`).
    pub fn with_commitment(mut self, commitment: &str) -> Self {
        self.commitment = commitment.to_string();
        self
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        debug!("Issuing {} request to {}", method, self.rpc_url);

        let response: JsonRpcResponse<T> = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("{method} request failed: {e}")))?
            .json()
            .await
            .map_err(|e| Error::Submission(format!("Failed to parse {method} response: {e}")))?;

        if let Some(error) = response.error {
            return Err(Error::Submission(format!(
                "RPC error from {method}: {} (code {})",
                error.message, error.code
            )));
        }

        response
            .result
            .ok_or_else(|| Error::Submission(format!("{method} response carries no result")))
    }

    /// Fetches a recent blockhash for transaction assembly.
    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        let params = serde_json::json!([{ "commitment": self.commitment }]);
        let value: RpcContext<BlockhashValue> =
            self.request("getLatestBlockhash", params).await?;

        Hash::from_str(&value.value.blockhash)
            .map_err(|e| Error::Submission(format!("Invalid blockhash in response: {e}")))
    }

    /// Broadcasts a signed, base64-encoded transaction and returns its
    /// signature. Preflight on the node side is controlled by the caller;
    /// the client performs its own simulation before calling this.
    pub async fn send_transaction(
        &self,
        transaction_base64: &str,
        skip_preflight: bool,
    ) -> Result<Signature> {
        let params = serde_json::json!([
            transaction_base64,
            {
                "encoding": "base64",
                "skipPreflight": skip_preflight,
                "preflightCommitment": self.commitment,
            }
        ]);
        let signature: String = self.request("sendTransaction", params).await?;

        Signature::from_str(&signature)
            .map_err(|e| Error::Submission(format!("Invalid signature in response: {e}")))
    }

    /// Dry-runs a signed, base64-encoded transaction against current state.
    pub async fn simulate_transaction(
        &self,
        transaction_base64: &str,
    ) -> Result<SimulationResult> {
        let params = serde_json::json!([
            transaction_base64,
            {
                "encoding": "base64",
                "commitment": self.commitment,
            }
        ]);
        let value: RpcContext<SimulationResult> =
            self.request("simulateTransaction", params).await?;
        Ok(value.value)
    }

    /// Reads account state for an address. Returns `None` when the address
    /// holds no allocated account.
    pub async fn get_account_info(&self, address: &Pubkey) -> Result<Option<AccountData>> {
        let params = serde_json::json!([
            address.to_string(),
            {
                "encoding": "base64",
                "commitment": self.commitment,
            }
        ]);
        let value: RpcContext<Option<RpcAccount>> = self.request("getAccountInfo", params).await?;

        let Some(account) = value.value else {
            return Ok(None);
        };

        let data = STANDARD
            .decode(&account.data.0)
            .map_err(|e| Error::Submission(format!("Failed to decode account data: {e}")))?;
        let owner = Pubkey::from_str(&account.owner)
            .map_err(|e| Error::Submission(format!("Invalid account owner in response: {e}")))?;

        Ok(Some(AccountData {
            lamports: account.lamports,
            owner,
            data,
        }))
    }

    /// Looks up the status of a previously submitted transaction. Returns
    /// `None` while the node has not yet observed the signature.
    pub async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> Result<Option<SignatureStatus>> {
        let params = serde_json::json!([
            [signature.to_string()],
            { "searchTransactionHistory": true }
        ]);
        let value: RpcContext<Vec<Option<SignatureStatus>>> =
            self.request("getSignatureStatuses", params).await?;
        Ok(value.value.into_iter().next().flatten())
    }

    /// Fetches the balance (in lamports) for an address.
    pub async fn get_balance(&self, address: &Pubkey) -> Result<u64> {
        let params = serde_json::json!([
            address.to_string(),
            { "commitment": self.commitment }
        ]);
        let value: RpcContext<u64> = self.request("getBalance", params).await?;
        Ok(value.value)
    }
}
