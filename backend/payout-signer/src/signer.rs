//! Creator-side payout signing.

use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{Result, SignerError};
use crate::payload;

/// A signed winner declaration, ready to submit to `declare_winner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAuthorization {
    pub contest_id: u64,
    pub winner: String,
    /// Decimal token amount (i128 does not survive JSON numbers).
    pub amount: String,
    /// Hex keccak256 digest that was signed.
    pub digest: String,
    /// Hex `r || s || v`, 65 bytes, v in {0, 1}.
    pub signature: String,
}

pub struct PayoutSigner {
    key: SigningKey,
    network_id: [u8; 32],
    contract_xdr: Vec<u8>,
}

impl PayoutSigner {
    pub fn new(secret_key: &[u8], network_passphrase: &str, contract_id: &str) -> Result<Self> {
        let key = SigningKey::from_slice(secret_key)?;
        let contract_xdr = payload::address_xdr(contract_id)
            .map_err(|_| SignerError::Config(format!("invalid CONTRACT_ID: {contract_id}")))?;
        if !contract_id.starts_with('C') {
            return Err(SignerError::Config(
                "CONTRACT_ID must be a contract address (C...)".to_string(),
            ));
        }
        Ok(Self {
            key,
            network_id: payload::network_id(network_passphrase),
            contract_xdr,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let secret = hex::decode(config.signer_secret_key.trim())?;
        Self::new(&secret, &config.network_passphrase, &config.contract_id)
    }

    /// Uncompressed SEC1 public key (65 bytes, hex). This is the `signer`
    /// value a creator registers when calling `create_contest`.
    pub fn public_key_hex(&self) -> String {
        let point = self.key.verifying_key().to_encoded_point(false);
        hex::encode(point.as_bytes())
    }

    pub fn digest(&self, contest_id: u64, winner: &str, amount: i128) -> Result<[u8; 32]> {
        let winner_xdr = payload::address_xdr(winner)?;
        Ok(payload::payout_digest(
            &self.network_id,
            &self.contract_xdr,
            contest_id,
            &winner_xdr,
            amount,
        ))
    }

    pub fn sign(&self, contest_id: u64, winner: &str, amount: i128) -> Result<PayoutAuthorization> {
        let digest = self.digest(contest_id, winner, amount)?;
        // k256 normalizes s to the low half, which the contract requires.
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(&digest)?;

        let mut raw = Vec::with_capacity(65);
        raw.extend_from_slice(&signature.to_bytes());
        raw.push(recovery_id.to_byte());

        Ok(PayoutAuthorization {
            contest_id,
            winner: winner.to_string(),
            amount: amount.to_string(),
            digest: hex::encode(digest),
            signature: hex::encode(raw),
        })
    }
}
