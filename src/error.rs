//! Error definitions for the intent client.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors surfaced by the intent client.
///
/// Local validation errors (`InvalidAccountList`, `InvalidConfig`) are never
/// retried. Network errors (`Submission`) are surfaced to the caller, who
/// decides on retry; submissions are not always safely idempotent, so the
/// client never retries on its own.
#[derive(Error, Debug)]
pub enum Error {
    /// An instruction's account list is malformed (conflicting duplicate
    /// entries, or a mismatch against a declared instruction schema).
    #[error("Invalid account list: {reason}")]
    InvalidAccountList { reason: String },

    /// Preflight simulation reported a program error; nothing was broadcast.
    #[error("Simulation failed: {error}")]
    Simulation { error: String, logs: Vec<String> },

    /// Transport or RPC failure while talking to the ledger node. The
    /// underlying operation may still have landed if the failure happened
    /// after broadcast; callers poll account state to learn the true outcome.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// The address holds no allocated account data.
    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    /// Account data exists but the caller's decoder rejected the byte layout.
    #[error("Failed to deserialize account {address}: {reason}")]
    Deserialization { address: Pubkey, reason: String },

    /// No bump in 255..=0 produced an off-curve derived address.
    #[error("No valid bump seed found for the given seeds and program id")]
    NoValidBump,

    /// Configuration is missing, malformed, or fails validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
