//! Program-Derived Address Utilities
//!
//! Deterministic address derivation from seeds and a program identifier, plus
//! the well-known derivations client code needs (associated token accounts,
//! token metadata). Everything here is pure; no network calls.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::{system_program, sysvar};

use crate::error::{Error, Result};

// ============================================================================
// WELL-KNOWN PROGRAM IDS
// ============================================================================

/// SPL token program id.
pub const TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// Associated token account program id.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Token metadata program id.
pub const METADATA_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub fn system_program_id() -> Pubkey {
    system_program::id()
}

pub fn rent_sysvar_id() -> Pubkey {
    sysvar::rent::id()
}

// ============================================================================
// DERIVATION
// ============================================================================

/// Derives a program address from seeds, searching bump values from 255
/// downward and accepting the first off-curve result.
///
/// Deterministic: the same (seeds, program id) always yields the same
/// (address, bump). Fails with `NoValidBump` when no bump in range produces a
/// valid off-curve address (also the case when a seed exceeds the maximum
/// seed length, since every candidate is rejected).
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    for bump in (0u8..=255).rev() {
        let bump_seed = [bump];
        let mut candidate_seeds: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 1);
        candidate_seeds.extend_from_slice(seeds);
        candidate_seeds.push(&bump_seed);
        if let Ok(address) = Pubkey::create_program_address(&candidate_seeds, program_id) {
            return Ok((address, bump));
        }
    }
    Err(Error::NoValidBump)
}

/// Derives the associated token account address for (owner, mint).
///
/// ATA = PDA([owner, token_program, mint], associated_token_program)
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .0
}

/// Derives the token metadata account address for a mint.
///
/// Metadata = PDA(["metadata", metadata_program, mint], metadata_program)
pub fn metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[b"metadata", METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_program() -> Pubkey {
        Pubkey::new_from_array([7u8; 32])
    }

    /// Test that derive agrees with the SDK's find_program_address
    /// Why: programs derive the same addresses on-chain with the SDK search,
    /// so any divergence would make accounts unreachable
    #[test]
    fn test_derive_matches_sdk_search() {
        let program_id = dummy_program();
        let seeds: &[&[u8]] = &[b"escrow", &[1u8; 32]];

        let (address, bump) = derive(seeds, &program_id).expect("derivation should succeed");
        let (expected_address, expected_bump) = Pubkey::find_program_address(seeds, &program_id);

        assert_eq!(address, expected_address);
        assert_eq!(bump, expected_bump);
    }

    /// Test that derivation is deterministic across calls
    #[test]
    fn test_derive_is_deterministic() {
        let program_id = dummy_program();
        let seeds: &[&[u8]] = &[b"state"];

        let first = derive(seeds, &program_id).expect("derivation should succeed");
        let second = derive(seeds, &program_id).expect("derivation should succeed");
        assert_eq!(first, second);
    }

    /// Test that an oversized seed exhausts the bump range
    /// Why: every candidate is rejected, so the search must report NoValidBump
    /// instead of looping forever or panicking
    #[test]
    fn test_derive_rejects_oversized_seed() {
        let oversized = [0u8; 33];
        let result = derive(&[&oversized], &dummy_program());
        assert!(matches!(result, Err(Error::NoValidBump)));
    }

    /// Test that the well-known program id constants render their base58 form
    /// Why: ATA and metadata derivation depend on correct program ids
    #[test]
    fn test_program_id_constants_render_base58() {
        assert_eq!(
            TOKEN_PROGRAM_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            ASSOCIATED_TOKEN_PROGRAM_ID.to_string(),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
        assert_eq!(
            METADATA_PROGRAM_ID.to_string(),
            "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s"
        );
    }

    /// Test that ATA derivation distinguishes owners and mints
    #[test]
    fn test_associated_token_address_varies_by_owner_and_mint() {
        let owner_a = Pubkey::new_from_array([1u8; 32]);
        let owner_b = Pubkey::new_from_array([2u8; 32]);
        let mint_a = Pubkey::new_from_array([3u8; 32]);
        let mint_b = Pubkey::new_from_array([4u8; 32]);

        let ata = associated_token_address(&owner_a, &mint_a);
        assert_eq!(ata, associated_token_address(&owner_a, &mint_a));
        assert_ne!(ata, associated_token_address(&owner_b, &mint_a));
        assert_ne!(ata, associated_token_address(&owner_a, &mint_b));
    }

    /// Test that metadata derivation is deterministic per mint
    #[test]
    fn test_metadata_address_deterministic() {
        let mint = Pubkey::new_from_array([6u8; 32]);
        assert_eq!(metadata_address(&mint), metadata_address(&mint));
        assert_ne!(
            metadata_address(&mint),
            metadata_address(&Pubkey::new_from_array([8u8; 32]))
        );
    }
}
