//! Application configuration loaded from environment variables.

use std::fmt;

use crate::errors::{Result, SignerError};

/// Passphrase of the public Stellar test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

#[derive(Clone)]
pub struct Config {
    /// Creator's secp256k1 secret key, hex-encoded (32 bytes)
    pub signer_secret_key: String,
    /// The contest pool contract address (Strkey format, C...)
    pub contract_id: String,
    /// Network passphrase; its sha256 is the ledger's network id
    pub network_passphrase: String,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            signer_secret_key: env_var("SIGNER_SECRET_KEY").map_err(|_| {
                SignerError::Config("SIGNER_SECRET_KEY environment variable is required".to_string())
            })?,
            contract_id: env_var("CONTRACT_ID").map_err(|_| {
                SignerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            network_passphrase: env_var("NETWORK_PASSPHRASE")
                .unwrap_or_else(|_| TESTNET_PASSPHRASE.to_string()),
            database_url: env_var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./payout_signer.db".to_string()),
            api_port: env_var("API_PORT")
                .unwrap_or_else(|_| "3002".to_string())
                .parse()
                .map_err(|_| SignerError::Config("Invalid API_PORT".to_string()))?,
        })
    }
}

// Keeps the secret key out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("signer_secret_key", &"<redacted>")
            .field("contract_id", &self.contract_id)
            .field("network_passphrase", &self.network_passphrase)
            .field("database_url", &self.database_url)
            .field("api_port", &self.api_port)
            .finish()
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| SignerError::Config(format!("Missing env var: {key}")))
}
