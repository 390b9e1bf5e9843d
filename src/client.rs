//! Intent Client
//!
//! The submission front door: builds transaction intents, signs and
//! serializes them into the wire format the ledger node expects, runs the
//! preflight simulation, broadcasts, and polls for confirmation. Also exposes
//! read-only account fetches (raw bytes or Borsh-typed).
//!
//! Calls are independent; the client holds only the connection handle and no
//! shared mutable state, so callers control concurrency by issuing intents in
//! parallel or sequentially awaiting confirmation. An in-flight submission
//! cannot be retracted once the node accepts it: a confirmation timeout
//! reports `Pending`, and the caller polls account state to learn the true
//! outcome.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::BorshDeserialize;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::transaction::Transaction;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::intent::{
    ConfirmationResult, Instruction, TransactionIntent, TransactionStatus,
};
use crate::rpc::{AccountData, RpcConnection};

// ============================================================================
// SUBMISSION OPTIONS
// ============================================================================

/// Per-submission knobs.
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    /// Skip the preflight simulation and broadcast immediately.
    pub skip_preflight: bool,
    /// Poll for confirmation after broadcast.
    pub wait_for_confirmation: bool,
    /// How long to poll before reporting `Pending`.
    pub confirmation_timeout: Duration,
    /// Delay between confirmation polls.
    pub confirmation_poll_interval: Duration,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            skip_preflight: false,
            wait_for_confirmation: true,
            confirmation_timeout: Duration::from_secs(30),
            confirmation_poll_interval: Duration::from_millis(500),
        }
    }
}

// ============================================================================
// CLIENT
// ============================================================================

/// Transaction intent builder and submission client.
///
/// The connection is an explicit constructor dependency; there is no
/// process-wide provider. Signing capability is injected per submission as
/// `&[&dyn Signer]`.
pub struct IntentClient {
    connection: RpcConnection,
}

impl IntentClient {
    pub fn new(connection: RpcConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &RpcConnection {
        &self.connection
    }

    /// Pure intent construction; fails with `InvalidAccountList` if any
    /// instruction lists the same address twice with conflicting flags.
    pub fn build(
        &self,
        instructions: Vec<Instruction>,
        fee_payer: Pubkey,
    ) -> Result<TransactionIntent> {
        TransactionIntent::new(instructions, fee_payer)
    }

    /// Signs and submits an intent, consuming it.
    ///
    /// Unless `options.skip_preflight` is set, the transaction is simulated
    /// first and a reported program error aborts the submission with
    /// `Simulation` before anything is broadcast. Transport and RPC failures
    /// surface as `Submission`; the client never retries on its own.
    pub async fn submit(
        &self,
        intent: TransactionIntent,
        signers: &[&dyn Signer],
        options: &SubmitOptions,
    ) -> Result<ConfirmationResult> {
        let blockhash = self.connection.get_latest_blockhash().await?;

        let sdk_instructions: Vec<_> = intent
            .instructions
            .iter()
            .map(Instruction::to_sdk_instruction)
            .collect();
        let message = Message::new(&sdk_instructions, Some(&intent.fee_payer));
        let mut transaction = Transaction::new_unsigned(message);

        let signer_refs: Vec<&dyn Signer> = signers.to_vec();
        transaction
            .try_sign(&signer_refs, blockhash)
            .map_err(|e| Error::InvalidAccountList {
                reason: format!("signers do not satisfy the intent's account list: {e}"),
            })?;

        let serialized = bincode::serialize(&transaction)
            .map_err(|e| Error::Submission(format!("Failed to serialize transaction: {e}")))?;
        let encoded = STANDARD.encode(serialized);

        if !options.skip_preflight {
            let simulation = self.connection.simulate_transaction(&encoded).await?;
            if let Some(err) = simulation.err {
                return Err(Error::Simulation {
                    error: err.to_string(),
                    logs: simulation.logs.unwrap_or_default(),
                });
            }
            debug!(
                "Preflight simulation passed (units consumed: {:?})",
                simulation.units_consumed
            );
        }

        // The node-side preflight is skipped: either the client just ran the
        // simulation itself, or the caller explicitly opted out.
        let signature = self.connection.send_transaction(&encoded, true).await?;
        info!("Transaction submitted: signature={}", signature);

        if !options.wait_for_confirmation {
            return Ok(ConfirmationResult {
                signature,
                status: TransactionStatus::Pending,
                error: None,
            });
        }

        self.wait_for_confirmation(signature, options).await
    }

    /// Polls a single status snapshot for a submitted signature.
    pub async fn confirm(&self, signature: &Signature) -> Result<TransactionStatus> {
        match self.connection.get_signature_status(signature).await? {
            Some(status) if status.err.is_some() => Ok(TransactionStatus::Failed),
            Some(status) => match status.confirmation_status.as_deref() {
                Some("confirmed") | Some("finalized") => Ok(TransactionStatus::Confirmed),
                _ => Ok(TransactionStatus::Pending),
            },
            None => Ok(TransactionStatus::Pending),
        }
    }

    async fn wait_for_confirmation(
        &self,
        signature: Signature,
        options: &SubmitOptions,
    ) -> Result<ConfirmationResult> {
        let deadline = Instant::now() + options.confirmation_timeout;

        loop {
            if let Some(status) = self.connection.get_signature_status(&signature).await? {
                if let Some(err) = status.err {
                    info!("Transaction {} failed: {}", signature, err);
                    return Ok(ConfirmationResult {
                        signature,
                        status: TransactionStatus::Failed,
                        error: Some(err.to_string()),
                    });
                }
                if matches!(
                    status.confirmation_status.as_deref(),
                    Some("confirmed") | Some("finalized")
                ) {
                    debug!("Transaction {} confirmed at slot {}", signature, status.slot);
                    return Ok(ConfirmationResult {
                        signature,
                        status: TransactionStatus::Confirmed,
                        error: None,
                    });
                }
            }

            if Instant::now() >= deadline {
                // Broadcast outcome is unknown, not failed: the transaction
                // may still land after the client stops watching.
                warn!(
                    "Confirmation timed out for {}; transaction may still land",
                    signature
                );
                return Ok(ConfirmationResult {
                    signature,
                    status: TransactionStatus::Pending,
                    error: None,
                });
            }

            tokio::time::sleep(options.confirmation_poll_interval).await;
        }
    }

    /// Reads the raw data bytes held at an address.
    ///
    /// Fails with `AccountNotFound` when the address holds no allocated
    /// account; never a decoding error.
    pub async fn fetch_account(&self, address: &Pubkey) -> Result<Vec<u8>> {
        Ok(self.fetch_account_info(address).await?.data)
    }

    /// Reads full account state (lamports, owner, data) for an address.
    pub async fn fetch_account_info(&self, address: &Pubkey) -> Result<AccountData> {
        self.connection
            .get_account_info(address)
            .await?
            .ok_or(Error::AccountNotFound(*address))
    }

    /// Reads and Borsh-decodes the account held at an address.
    pub async fn fetch_account_as<T: BorshDeserialize>(&self, address: &Pubkey) -> Result<T> {
        let data = self.fetch_account(address).await?;
        T::try_from_slice(&data).map_err(|e| Error::Deserialization {
            address: *address,
            reason: e.to_string(),
        })
    }

    /// Fetches the balance (in lamports) held at an address.
    pub async fn balance(&self, address: &Pubkey) -> Result<u64> {
        self.connection.get_balance(address).await
    }
}
