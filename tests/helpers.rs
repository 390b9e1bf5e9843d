//! Shared test helpers for integration tests
//!
//! Mock ledger-node builders (wiremock) and dummy identities used across the
//! test files. Each mount_* function installs a mock for exactly one JSON-RPC
//! method, matched on the method name in the request body.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use svm_intent_client::RpcConnection;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// DUMMY IDENTITIES
// ============================================================================

pub fn dummy_program_id() -> Pubkey {
    Pubkey::new_from_array([9u8; 32])
}

pub fn dummy_blockhash() -> Hash {
    Hash::new_from_array([3u8; 32])
}

pub fn dummy_signature() -> Signature {
    Signature::from([42u8; 64])
}

// ============================================================================
// CONNECTION AND RESPONSE BUILDERS
// ============================================================================

pub fn test_connection(server: &MockServer) -> RpcConnection {
    RpcConnection::new(&server.uri()).expect("Failed to create connection")
}

fn rpc_result(value: serde_json::Value) -> serde_json::Value {
    json!({ "jsonrpc": "2.0", "id": 1, "result": value })
}

fn rpc_context_result(value: serde_json::Value) -> serde_json::Value {
    rpc_result(json!({ "context": { "slot": 1 }, "value": value }))
}

// ============================================================================
// MOCK MOUNTS
// ============================================================================

pub async fn mount_latest_blockhash(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getLatestBlockhash" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!({
            "blockhash": dummy_blockhash().to_string(),
            "lastValidBlockHeight": 1000,
        }))))
        .mount(server)
        .await;
}

pub async fn mount_simulation_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "simulateTransaction" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!({
            "err": null,
            "logs": [],
            "unitsConsumed": 150,
        }))))
        .mount(server)
        .await;
}

pub async fn mount_simulation_failure(
    server: &MockServer,
    err: serde_json::Value,
    logs: Vec<&str>,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "simulateTransaction" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!({
            "err": err,
            "logs": logs,
            "unitsConsumed": 0,
        }))))
        .mount(server)
        .await;
}

/// Mounts sendTransaction returning the dummy signature.
pub async fn mount_send_transaction(server: &MockServer) -> Signature {
    let signature = dummy_signature();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "sendTransaction" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(rpc_result(json!(signature.to_string()))),
        )
        .mount(server)
        .await;
    signature
}

/// Mounts sendTransaction answering with a JSON-RPC error object.
pub async fn mount_send_transaction_error(server: &MockServer, code: i64, message: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "sendTransaction" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": code, "message": message },
        })))
        .mount(server)
        .await;
}

/// Mounts sendTransaction with an expectation that it is never called.
/// The mock server panics on drop if the expectation is violated.
pub async fn mount_send_transaction_never(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "sendTransaction" })))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn mount_signature_status_confirmed(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getSignatureStatuses" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!([
            {
                "slot": 42,
                "confirmations": 5,
                "err": null,
                "confirmationStatus": "confirmed",
            }
        ]))))
        .mount(server)
        .await;
}

pub async fn mount_signature_status_failed(server: &MockServer, err: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getSignatureStatuses" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!([
            {
                "slot": 42,
                "confirmations": 5,
                "err": err,
                "confirmationStatus": "confirmed",
            }
        ]))))
        .mount(server)
        .await;
}

/// Node has not observed the signature yet: statuses come back null.
pub async fn mount_signature_status_unknown(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getSignatureStatuses" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!([null]))))
        .mount(server)
        .await;
}

pub async fn mount_account_info(server: &MockServer, data: &[u8], owner: &Pubkey) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getAccountInfo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!({
            "data": [STANDARD.encode(data), "base64"],
            "lamports": 1_000_000u64,
            "owner": owner.to_string(),
            "executable": false,
            "rentEpoch": 0,
        }))))
        .mount(server)
        .await;
}

/// Address holds no allocated account: value comes back null.
pub async fn mount_account_missing(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getAccountInfo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!(null))))
        .mount(server)
        .await;
}

pub async fn mount_balance(server: &MockServer, lamports: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "getBalance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(rpc_context_result(json!(lamports))))
        .mount(server)
        .await;
}
