//! Payout message encoding.
//!
//! Reproduces, byte for byte, the digest the contest pool contract recomputes
//! inside `declare_winner`:
//!
//! ```text
//! keccak256("CONTEST_POOL_PAYOUT_V1" || network_id || xdr(contract)
//!           || contest_id (u64 BE) || xdr(winner) || amount (i128 BE))
//! ```
//!
//! Addresses are hashed as their `ScVal::Address` XDR encoding, which is what
//! the contract's `to_xdr` produces.

use sha2::{Digest, Sha256};
use sha3::Keccak256;
use stellar_strkey::Strkey;

use crate::errors::{Result, SignerError};

pub const PAYOUT_DOMAIN: &[u8] = b"CONTEST_POOL_PAYOUT_V1";

// XDR discriminants (all encoded as big-endian u32).
const SCV_ADDRESS: u32 = 18;
const SC_ADDRESS_TYPE_ACCOUNT: u32 = 0;
const SC_ADDRESS_TYPE_CONTRACT: u32 = 1;
const PUBLIC_KEY_TYPE_ED25519: u32 = 0;

/// The ledger's network id: sha256 of the network passphrase.
pub fn network_id(passphrase: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));
    out
}

/// Encode a `G...` account or `C...` contract strkey as `ScVal::Address` XDR.
pub fn address_xdr(strkey: &str) -> Result<Vec<u8>> {
    let decoded = Strkey::from_string(strkey)
        .map_err(|_| SignerError::InvalidRequest(format!("invalid address: {strkey}")))?;

    let mut out = Vec::with_capacity(44);
    out.extend_from_slice(&SCV_ADDRESS.to_be_bytes());
    match decoded {
        Strkey::PublicKeyEd25519(key) => {
            out.extend_from_slice(&SC_ADDRESS_TYPE_ACCOUNT.to_be_bytes());
            out.extend_from_slice(&PUBLIC_KEY_TYPE_ED25519.to_be_bytes());
            out.extend_from_slice(&key.0);
        }
        Strkey::Contract(contract) => {
            out.extend_from_slice(&SC_ADDRESS_TYPE_CONTRACT.to_be_bytes());
            out.extend_from_slice(&contract.0);
        }
        _ => {
            return Err(SignerError::InvalidRequest(format!(
                "address must be an account (G...) or contract (C...): {strkey}"
            )))
        }
    }
    Ok(out)
}

/// Keccak-256 digest of a payout tuple, as signed by the contest creator.
pub fn payout_digest(
    network_id: &[u8; 32],
    contract_xdr: &[u8],
    contest_id: u64,
    winner_xdr: &[u8],
    amount: i128,
) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PAYOUT_DOMAIN);
    hasher.update(network_id);
    hasher.update(contract_xdr);
    hasher.update(contest_id.to_be_bytes());
    hasher.update(winner_xdr);
    hasher.update(amount.to_be_bytes());

    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Parse a decimal token amount. Payouts must be strictly positive.
pub fn parse_amount(raw: &str) -> Result<i128> {
    let amount: i128 = raw
        .trim()
        .parse()
        .map_err(|_| SignerError::InvalidRequest(format!("invalid amount: {raw}")))?;
    if amount <= 0 {
        return Err(SignerError::InvalidRequest(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}
