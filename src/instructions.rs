//! Instruction Builders
//!
//! Schema-validated builders for the common token operations client code
//! issues: mint initialization, idempotent associated-token-account creation,
//! SPL token minting, and token metadata creation. Each builder has a
//! declared account schema so callers can validate hand-assembled variants of
//! the same instruction kind.

use solana_sdk::pubkey::Pubkey;

use crate::intent::{AccountRef, AccountRule, AccountSchema, Instruction};
use crate::pda;

/// SPL token instruction tag for InitializeMint.
const INITIALIZE_MINT_TAG: u8 = 0;

/// SPL token instruction tag for MintTo.
const MINT_TO_TAG: u8 = 7;

/// Associated-token-program instruction tag for CreateIdempotent.
const CREATE_IDEMPOTENT_TAG: u8 = 1;

/// Token-metadata-program discriminator for CreateMetadataAccountV3.
const CREATE_METADATA_V3_TAG: u8 = 33;

/// Builds an SPL token `InitializeMint` instruction: turns a freshly
/// allocated account into a mint with the given decimals and authorities.
///
/// The mint account must already exist and be owned by the token program;
/// initialization reads the rent sysvar to verify rent exemption.
pub fn initialize_mint(
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Instruction {
    let mut data = Vec::with_capacity(67);
    data.push(INITIALIZE_MINT_TAG);
    data.push(decimals);
    data.extend_from_slice(mint_authority.as_ref());
    match freeze_authority {
        Some(authority) => {
            data.push(1);
            data.extend_from_slice(authority.as_ref());
        }
        None => data.push(0),
    }

    Instruction::new(
        pda::TOKEN_PROGRAM_ID,
        vec![
            AccountRef::writable(*mint, false),
            AccountRef::readonly(pda::rent_sysvar_id(), false),
        ],
        data,
    )
}

/// Declared account layout for `InitializeMint`.
pub fn initialize_mint_schema() -> AccountSchema {
    AccountSchema::new(
        "InitializeMint",
        vec![
            AccountRule::new("mint", true, false),
            AccountRule::new("rent_sysvar", false, false),
        ],
    )
}

/// Builds a `CreateIdempotent` instruction for the associated token program:
/// creates the ATA for (owner, mint) unless it already exists.
pub fn create_associated_token_account_idempotent(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    let ata = pda::associated_token_address(owner, mint);
    Instruction::new(
        pda::ASSOCIATED_TOKEN_PROGRAM_ID,
        vec![
            AccountRef::writable(*payer, true),
            AccountRef::writable(ata, false),
            AccountRef::readonly(*owner, false),
            AccountRef::readonly(*mint, false),
            AccountRef::readonly(pda::system_program_id(), false),
            AccountRef::readonly(pda::TOKEN_PROGRAM_ID, false),
        ],
        vec![CREATE_IDEMPOTENT_TAG],
    )
}

/// Declared account layout for `CreateIdempotent`.
pub fn create_associated_token_account_schema() -> AccountSchema {
    AccountSchema::new(
        "CreateIdempotent",
        vec![
            AccountRule::new("payer", true, true),
            AccountRule::new("associated_token_account", true, false),
            AccountRule::new("owner", false, false),
            AccountRule::new("mint", false, false),
            AccountRule::new("system_program", false, false),
            AccountRule::new("token_program", false, false),
        ],
    )
}

/// Builds an SPL token `MintTo` instruction: mints `amount` base units of
/// `mint` into `token_account`, authorized by `mint_authority`.
pub fn mint_to(
    mint: &Pubkey,
    token_account: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(MINT_TO_TAG);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction::new(
        pda::TOKEN_PROGRAM_ID,
        vec![
            AccountRef::writable(*mint, false),
            AccountRef::writable(*token_account, false),
            AccountRef::readonly(*mint_authority, true),
        ],
        data,
    )
}

/// Declared account layout for `MintTo`.
pub fn mint_to_schema() -> AccountSchema {
    AccountSchema::new(
        "MintTo",
        vec![
            AccountRule::new("mint", true, false),
            AccountRule::new("token_account", true, false),
            AccountRule::new("mint_authority", false, true),
        ],
    )
}

/// Builds a `CreateMetadataAccountV3` instruction for the token metadata
/// program: attaches name, symbol, and URI to a mint at the derived metadata
/// address.
///
/// The metadata account address is derived here; callers only name the mint.
/// Creator shares, collection membership, and usage limits are left unset.
pub fn create_metadata(
    mint: &Pubkey,
    mint_authority: &Pubkey,
    payer: &Pubkey,
    update_authority: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Instruction {
    let mut data = Vec::new();
    data.push(CREATE_METADATA_V3_TAG);
    push_borsh_str(&mut data, name);
    push_borsh_str(&mut data, symbol);
    push_borsh_str(&mut data, uri);
    data.extend_from_slice(&0u16.to_le_bytes()); // seller fee basis points
    data.extend_from_slice(&[0, 0, 0]); // no creators, collection, uses
    data.push(1); // mutable
    data.push(0); // no collection details

    Instruction::new(
        pda::METADATA_PROGRAM_ID,
        vec![
            AccountRef::writable(pda::metadata_address(mint), false),
            AccountRef::readonly(*mint, false),
            AccountRef::readonly(*mint_authority, true),
            AccountRef::writable(*payer, true),
            AccountRef::readonly(*update_authority, false),
            AccountRef::readonly(pda::system_program_id(), false),
            AccountRef::readonly(pda::rent_sysvar_id(), false),
        ],
        data,
    )
}

/// Declared account layout for `CreateMetadataAccountV3`.
pub fn create_metadata_schema() -> AccountSchema {
    AccountSchema::new(
        "CreateMetadataAccountV3",
        vec![
            AccountRule::new("metadata", true, false),
            AccountRule::new("mint", false, false),
            AccountRule::new("mint_authority", false, true),
            AccountRule::new("payer", true, true),
            AccountRule::new("update_authority", false, false),
            AccountRule::new("system_program", false, false),
            AccountRule::new("rent_sysvar", false, false),
        ],
    )
}

/// Borsh string encoding: u32 LE length prefix, then UTF-8 bytes.
fn push_borsh_str(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u32).to_le_bytes());
    data.extend_from_slice(value.as_bytes());
}
