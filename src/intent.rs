//! Transaction Intent Data Model
//!
//! This module defines the structured description of a desired ledger
//! operation before submission: ordered account references with
//! writable/signer flags, instruction payloads, and the confirmation outcome
//! reported back to the caller.

use std::collections::HashMap;

use solana_sdk::instruction::{AccountMeta, Instruction as SdkInstruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::error::{Error, Result};

// ============================================================================
// ACCOUNT REFERENCES
// ============================================================================

/// A single account referenced by an instruction.
///
/// The address is immutable once constructed; the flags must match what the
/// receiving program declares, or submission fails on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountRef {
    address: Pubkey,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl AccountRef {
    pub fn new(address: Pubkey, is_writable: bool, is_signer: bool) -> Self {
        Self {
            address,
            is_writable,
            is_signer,
        }
    }

    /// Writable account reference.
    pub fn writable(address: Pubkey, is_signer: bool) -> Self {
        Self::new(address, true, is_signer)
    }

    /// Read-only account reference.
    pub fn readonly(address: Pubkey, is_signer: bool) -> Self {
        Self::new(address, false, is_signer)
    }

    pub fn address(&self) -> Pubkey {
        self.address
    }

    fn to_account_meta(self) -> AccountMeta {
        if self.is_writable {
            AccountMeta::new(self.address, self.is_signer)
        } else {
            AccountMeta::new_readonly(self.address, self.is_signer)
        }
    }
}

// ============================================================================
// INSTRUCTIONS
// ============================================================================

/// A single program invocation: program id, ordered account list, and an
/// opaque byte payload. Account order is semantically significant and is
/// preserved verbatim on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountRef>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Pubkey, accounts: Vec<AccountRef>, data: Vec<u8>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }

    /// Rejects account lists that mention the same address twice with
    /// conflicting writable/signer flags. Duplicate entries with identical
    /// flags are allowed; the wire format deduplicates them.
    pub(crate) fn check_account_conflicts(&self) -> Result<()> {
        let mut seen: HashMap<Pubkey, (bool, bool)> = HashMap::new();
        for (position, account) in self.accounts.iter().enumerate() {
            match seen.get(&account.address) {
                Some(&(is_writable, is_signer))
                    if is_writable != account.is_writable || is_signer != account.is_signer =>
                {
                    return Err(Error::InvalidAccountList {
                        reason: format!(
                            "account {} listed twice with conflicting flags (position {})",
                            account.address, position
                        ),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(account.address, (account.is_writable, account.is_signer));
                }
            }
        }
        Ok(())
    }

    /// Validates this instruction's account list against the schema declared
    /// for its instruction kind, naming the offending account on mismatch.
    pub fn validate_against(&self, schema: &AccountSchema) -> Result<()> {
        if self.accounts.len() != schema.accounts.len() {
            return Err(Error::InvalidAccountList {
                reason: format!(
                    "`{}` expects {} accounts, got {}",
                    schema.instruction,
                    schema.accounts.len(),
                    self.accounts.len()
                ),
            });
        }
        for (position, (account, rule)) in self.accounts.iter().zip(&schema.accounts).enumerate() {
            if account.is_writable != rule.is_writable || account.is_signer != rule.is_signer {
                return Err(Error::InvalidAccountList {
                    reason: format!(
                        "account `{}` of `{}` (position {}) must be {}, got {}",
                        rule.name,
                        schema.instruction,
                        position,
                        flags_label(rule.is_writable, rule.is_signer),
                        flags_label(account.is_writable, account.is_signer),
                    ),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn to_sdk_instruction(&self) -> SdkInstruction {
        SdkInstruction {
            program_id: self.program_id,
            accounts: self
                .accounts
                .iter()
                .map(|account| account.to_account_meta())
                .collect(),
            data: self.data.clone(),
        }
    }
}

fn flags_label(is_writable: bool, is_signer: bool) -> String {
    format!(
        "{}/{}",
        if is_writable { "writable" } else { "readonly" },
        if is_signer { "signer" } else { "non-signer" },
    )
}

// ============================================================================
// ACCOUNT SCHEMAS
// ============================================================================

/// Expected flags for one account position of an instruction kind.
#[derive(Debug, Clone, Copy)]
pub struct AccountRule {
    pub name: &'static str,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl AccountRule {
    pub const fn new(name: &'static str, is_writable: bool, is_signer: bool) -> Self {
        Self {
            name,
            is_writable,
            is_signer,
        }
    }
}

/// Declared account layout for one instruction kind.
///
/// Programs consume accounts positionally; a schema gives each position a
/// name and expected flags so that a miswired account list fails loudly at
/// build time instead of silently on-chain.
#[derive(Debug, Clone)]
pub struct AccountSchema {
    pub instruction: &'static str,
    pub accounts: Vec<AccountRule>,
}

impl AccountSchema {
    pub fn new(instruction: &'static str, accounts: Vec<AccountRule>) -> Self {
        Self {
            instruction,
            accounts,
        }
    }
}

// ============================================================================
// TRANSACTION INTENTS
// ============================================================================

/// A validated, not-yet-submitted ledger operation.
///
/// Constructed per call, submitted once, and discarded after confirmation or
/// failure; never reused. The co-signers required to authorize the intent are
/// supplied at submission time.
#[derive(Debug, Clone)]
pub struct TransactionIntent {
    pub instructions: Vec<Instruction>,
    pub fee_payer: Pubkey,
}

impl TransactionIntent {
    /// Pure construction; fails if any instruction's account list contains
    /// duplicate entries with conflicting flags.
    pub fn new(instructions: Vec<Instruction>, fee_payer: Pubkey) -> Result<Self> {
        for instruction in &instructions {
            instruction.check_account_conflicts()?;
        }
        Ok(Self {
            instructions,
            fee_payer,
        })
    }
}

// ============================================================================
// CONFIRMATION
// ============================================================================

/// Observed state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Broadcast but not yet confirmed. A confirmation timeout also reports
    /// `Pending`: the transaction may still land, and callers poll account
    /// state to learn the true outcome.
    Pending,
    Confirmed,
    Failed,
}

/// Outcome of a submission, reported back to the caller.
#[derive(Debug, Clone)]
pub struct ConfirmationResult {
    pub signature: Signature,
    pub status: TransactionStatus,
    /// The node's error value for failed transactions, rendered as JSON. The
    /// error space is owned by the executing program, not this client.
    pub error: Option<String>,
}
