//! Keypair Loading
//!
//! Signing itself is an injected capability: submissions take
//! `&[&dyn Signer]`, so any signing provider implementing the SDK `Signer`
//! trait works. This module only covers the common case of loading a local
//! Ed25519 keypair from a base64-encoded 32-byte seed.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::signer::keypair::{keypair_from_seed, Keypair};

use crate::error::{Error, Result};

/// Loads a keypair from a base64-encoded Ed25519 seed (32 bytes).
pub fn keypair_from_base64_seed(seed_base64: &str) -> Result<Keypair> {
    let seed = STANDARD
        .decode(seed_base64)
        .map_err(|e| Error::InvalidConfig(format!("Failed to decode base64 seed: {e}")))?;

    if seed.len() != 32 {
        return Err(Error::InvalidConfig(format!(
            "Invalid seed length: expected 32 bytes, got {}",
            seed.len()
        )));
    }

    keypair_from_seed(&seed)
        .map_err(|e| Error::InvalidConfig(format!("Failed to derive keypair from seed: {e}")))
}
