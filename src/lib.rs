//! SVM Intent Client Library
//!
//! This crate provides a transaction-intent builder and submission client for
//! SVM ledgers: it builds a structured description of a desired ledger
//! operation (program id, ordered account list with writable/signer flags,
//! instruction payload), signs it with injected signers, submits it to a
//! remote ledger node over JSON-RPC, and optionally waits for confirmation or
//! reads back account state.
//!
//! The client holds no shared mutable state beyond the connection handle;
//! intents are constructed per call, submitted once, and discarded.

pub mod client;
pub mod config;
pub mod error;
pub mod instructions;
pub mod intent;
pub mod pda;
pub mod rpc;
pub mod signer;

// Re-export commonly used types
pub use client::{IntentClient, SubmitOptions};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use intent::{
    AccountRef, AccountRule, AccountSchema, ConfirmationResult, Instruction, TransactionIntent,
    TransactionStatus,
};
pub use rpc::{AccountData, RpcConnection, SignatureStatus, SimulationResult};
pub use signer::keypair_from_base64_seed;
