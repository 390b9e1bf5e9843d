//! Configuration Management Module
//!
//! This module handles loading and validating client configuration: the
//! ledger node endpoint, commitment level, timeouts, and optionally the name
//! of the environment variable holding the operator's keypair seed. Keys are
//! never stored in the configuration file itself.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use solana_sdk::signer::keypair::Keypair;

use crate::client::SubmitOptions;
use crate::error::{Error, Result};
use crate::rpc::RpcConnection;
use crate::signer;

/// Environment variable overriding the config file path (for tests and
/// deployments).
pub const CONFIG_PATH_ENV: &str = "SVM_INTENT_CLIENT_CONFIG_PATH";

const DEFAULT_CONFIG_PATH: &str = "config/client.toml";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint URL of the ledger node
    pub rpc_url: String,
    /// Commitment level for queries and preflight (processed, confirmed, finalized)
    #[serde(default = "default_commitment")]
    pub commitment: String,
    /// Per-request HTTP timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// How long to poll for confirmation before reporting Pending, in milliseconds
    #[serde(default = "default_confirmation_timeout_ms")]
    pub confirmation_timeout_ms: u64,
    /// Delay between confirmation polls in milliseconds
    #[serde(default = "default_confirmation_poll_interval_ms")]
    pub confirmation_poll_interval_ms: u64,
    /// Skip preflight simulation on submission
    #[serde(default)]
    pub skip_preflight: bool,
    /// Name of the environment variable holding the base64 keypair seed
    #[serde(default)]
    pub keypair_seed_env: Option<String>,
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_confirmation_timeout_ms() -> u64 {
    30_000
}

fn default_confirmation_poll_interval_ms() -> u64 {
    500
}

impl ClientConfig {
    /// Loads configuration from `config/client.toml` (or the path named by
    /// `SVM_INTENT_CLIENT_CONFIG_PATH`).
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !std::path::Path::new(&config_path).exists() {
            return Err(Error::InvalidConfig(format!(
                "Configuration file '{config_path}' not found. Please copy the template:\n\
                cp config/client.template.toml config/client.toml\n\
                Then edit config/client.toml with your actual values."
            )));
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| Error::InvalidConfig(format!("Failed to read '{config_path}': {e}")))?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates endpoint, commitment, and timing settings.
    pub fn validate(&self) -> Result<()> {
        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "rpc_url must be an http(s) URL, got '{}'",
                self.rpc_url
            )));
        }
        if !matches!(
            self.commitment.as_str(),
            "processed" | "confirmed" | "finalized"
        ) {
            return Err(Error::InvalidConfig(format!(
                "commitment must be one of processed, confirmed, finalized; got '{}'",
                self.commitment
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.confirmation_poll_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "confirmation_poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds a connection to the configured ledger node.
    pub fn connection(&self) -> Result<RpcConnection> {
        Ok(RpcConnection::with_timeout(
            &self.rpc_url,
            Duration::from_millis(self.request_timeout_ms),
        )?
        .with_commitment(&self.commitment))
    }

    /// Submission options derived from the configured timings.
    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions {
            skip_preflight: self.skip_preflight,
            wait_for_confirmation: true,
            confirmation_timeout: Duration::from_millis(self.confirmation_timeout_ms),
            confirmation_poll_interval: Duration::from_millis(self.confirmation_poll_interval_ms),
        }
    }

    /// Loads the operator keypair from the configured environment variable.
    pub fn keypair(&self) -> Result<Keypair> {
        let env_name = self.keypair_seed_env.as_deref().ok_or_else(|| {
            Error::InvalidConfig("keypair_seed_env is not configured".to_string())
        })?;
        let seed = std::env::var(env_name).map_err(|_| {
            Error::InvalidConfig(format!("Environment variable '{env_name}' is not set"))
        })?;
        signer::keypair_from_base64_seed(&seed)
    }
}
