//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Signing error: {0}")]
    Crypto(#[from] k256::ecdsa::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Contest {contest_id} already has a different payout authorized")]
    Conflict { contest_id: u64 },

    #[error("No payout authorized for contest {0}")]
    NotFound(u64),
}

pub type Result<T> = std::result::Result<T, SignerError>;
