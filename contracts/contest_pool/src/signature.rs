//! # Payout signature verification (secp256k1)
//!
//! The contest creator authorizes a prize payout off-chain by signing the
//! canonical payout digest with the key recorded as `ContestConfig::signer`.
//!
//! ## Canonical message
//!
//! ```text
//! keccak256(
//!     "CONTEST_POOL_PAYOUT_V1"
//!  || network_id                        32 bytes
//!  || xdr(ScVal::Address(this contract))
//!  || contest_id                        u64, big-endian
//!  || xdr(ScVal::Address(winner))
//!  || amount                            i128, big-endian
//! )
//! ```
//!
//! The domain tag, network id and contract address bind a signature to this
//! protocol on this deployment.
//!
//! ## Signature format
//!
//! 65 bytes, `r || s || v`, with `v` in `{0, 1, 27, 28}`. Before asking the
//! host to recover the key, the signature is checked to be well-formed:
//! `r` and `s` in `[1, n-1]`, `s` in the lower half of the order, and `r` a
//! valid x-coordinate. Signatures that would recover to the point at infinity
//! are also caught. Anything else is rejected with `false` rather than
//! trapping inside the host.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};
use soroban_sdk::{crypto::Hash, log, xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Domain separation tag prepended to every payout message.
pub const PAYOUT_DOMAIN: &[u8] = b"CONTEST_POOL_PAYOUT_V1";

/// secp256k1 curve order n.
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// floor(n / 2).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Build the keccak256 digest the creator must sign for this payout.
pub fn payout_digest(env: &Env, contest_id: u64, winner: &Address, amount: i128) -> Hash<32> {
    let mut message = Bytes::from_slice(env, PAYOUT_DOMAIN);
    message.append(&env.ledger().network_id().into());
    message.append(&env.current_contract_address().to_xdr(env));
    message.extend_from_array(&contest_id.to_be_bytes());
    message.append(&winner.clone().to_xdr(env));
    message.extend_from_array(&amount.to_be_bytes());
    env.crypto().keccak256(&message)
}

/// Check that `signature` was produced by `expected_signer` over exactly
/// `(contest_id, winner, amount)` on this deployment.
///
/// Pure: reads the ledger's network id and the contract address, writes nothing.
pub fn verify(
    env: &Env,
    contest_id: u64,
    winner: &Address,
    amount: i128,
    signature: &BytesN<65>,
    expected_signer: &BytesN<65>,
) -> bool {
    let raw = signature.to_array();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..64]);

    let Some(recovery_id) = parse_recovery_id(raw[64]) else {
        log!(env, "payout signature rejected: recovery id", raw[64] as u32);
        return false;
    };
    if !is_valid_scalar(&r) || !is_valid_r_coordinate(&r) {
        log!(env, "payout signature rejected: invalid r");
        return false;
    }
    if !is_valid_scalar(&s) || !is_low_s(&s) {
        log!(env, "payout signature rejected: invalid or high s");
        return false;
    }

    let digest = payout_digest(env, contest_id, winner, amount);
    if recovers_to_identity(&r, &s, recovery_id, &digest.to_array()) {
        log!(env, "payout signature rejected: degenerate recovery");
        return false;
    }

    let mut rs = [0u8; 64];
    rs.copy_from_slice(&raw[..64]);
    let recovered = env
        .crypto()
        .secp256k1_recover(&digest, &BytesN::from_array(env, &rs), recovery_id);

    recovered == *expected_signer
}

/// Accept raw (0, 1) and Ethereum-style (27, 28) recovery ids.
fn parse_recovery_id(v: u8) -> Option<u32> {
    match v {
        0 | 1 => Some(v as u32),
        27 | 28 => Some((v - 27) as u32),
        _ => None,
    }
}

/// Scalar in `[1, n-1]`. Big-endian byte arrays compare numerically.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    scalar.iter().any(|&b| b != 0) && *scalar < SECP256K1_ORDER
}

/// `s <= n/2`; the host rejects the high-s twin of a signature.
fn is_low_s(s: &[u8; 32]) -> bool {
    *s <= SECP256K1_HALF_ORDER
}

/// Only about half of all field elements are x-coordinates of curve points.
fn is_valid_r_coordinate(r: &[u8; 32]) -> bool {
    decompress_r(r, 0).is_some()
}

/// The curve point with x-coordinate `r` and y parity `recovery_id`.
fn decompress_r(r: &[u8; 32], recovery_id: u32) -> Option<AffinePoint> {
    let mut compressed = [0u8; 33];
    compressed[0] = if recovery_id == 1 { 0x03 } else { 0x02 };
    compressed[1..].copy_from_slice(r);

    let encoded = EncodedPoint::from_bytes(compressed).ok()?;
    AffinePoint::from_encoded_point(&encoded).into()
}

/// Recovery computes `Q = r^-1 (s·R - e·G)`. When `s·R == e·G` the result is
/// the point at infinity, which the host refuses with a trap.
fn recovers_to_identity(r: &[u8; 32], s: &[u8; 32], recovery_id: u32, digest: &[u8; 32]) -> bool {
    let Some(point) = decompress_r(r, recovery_id) else {
        return false;
    };
    let Some(s) = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from(*s))) else {
        return false;
    };
    let e = <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*digest));

    ProjectivePoint::from(point) * s == ProjectivePoint::GENERATOR * e
}
