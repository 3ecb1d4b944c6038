extern crate std;

use k256::ecdsa::SigningKey;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    xdr::ToXdr,
    Address, BytesN, Env, String,
};

use crate::signature;
use crate::test_setup::Fixture;
use crate::{ContestPool, ContestPoolClient};

/// secp256k1 curve order n, big-endian.
const ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n - s, used to build the high-s twin of a valid signature.
fn negate_scalar(s: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let mut diff = ORDER[i] as i16 - s[i] as i16 - borrow;
        borrow = 0;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        }
        out[i] = diff as u8;
    }
    out
}

fn verify_in_contract(
    f: &Fixture,
    contest_id: u64,
    winner: &Address,
    amount: i128,
    sig: &BytesN<65>,
) -> bool {
    let signer = f.public_key(&f.signing_key);
    f.env.as_contract(&f.client.address, || {
        signature::verify(&f.env, contest_id, winner, amount, sig, &signer)
    })
}

fn with_bytes(f: &Fixture, sig: &BytesN<65>, edit: impl FnOnce(&mut [u8; 65])) -> BytesN<65> {
    let mut raw = sig.to_array();
    edit(&mut raw);
    BytesN::from_array(&f.env, &raw)
}

#[test]
fn test_valid_signature_verifies() {
    let f = Fixture::new();
    let winner = Address::generate(&f.env);
    let sig = f.sign_payout(3, &winner, 1_000);
    assert!(verify_in_contract(&f, 3, &winner, 1_000, &sig));
}

#[test]
fn test_ethereum_style_recovery_id_accepted() {
    let f = Fixture::new();
    let winner = Address::generate(&f.env);
    let sig = f.sign_payout(0, &winner, 42);
    let eth_style = with_bytes(&f, &sig, |raw| raw[64] += 27);
    assert!(verify_in_contract(&f, 0, &winner, 42, &eth_style));
}

#[test]
fn test_signature_bound_to_exact_tuple() {
    let f = Fixture::new();
    let winner = Address::generate(&f.env);
    let other = Address::generate(&f.env);
    let sig = f.sign_payout(1, &winner, 500);

    assert!(!verify_in_contract(&f, 1, &winner, 501, &sig));
    assert!(!verify_in_contract(&f, 2, &winner, 500, &sig));
    assert!(!verify_in_contract(&f, 1, &other, 500, &sig));
}

#[test]
fn test_signature_from_other_key_rejected() {
    let f = Fixture::new();
    let winner = Address::generate(&f.env);
    let impostor = SigningKey::from_slice(&[0x24u8; 32]).unwrap();
    let sig = f.sign_with(&impostor, 1, &winner, 500);
    assert!(!verify_in_contract(&f, 1, &winner, 500, &sig));
}

#[test]
fn test_malformed_signatures_rejected() {
    let f = Fixture::new();
    let winner = Address::generate(&f.env);
    let sig = f.sign_payout(1, &winner, 500);

    let bad_recovery_id = with_bytes(&f, &sig, |raw| raw[64] = 4);
    let zero_r = with_bytes(&f, &sig, |raw| raw[..32].fill(0));
    let zero_s = with_bytes(&f, &sig, |raw| raw[32..64].fill(0));
    let r_at_order = with_bytes(&f, &sig, |raw| raw[..32].copy_from_slice(&ORDER));
    let high_s = with_bytes(&f, &sig, |raw| {
        let negated = negate_scalar(&raw[32..64]);
        raw[32..64].copy_from_slice(&negated);
        raw[64] ^= 1;
    });
    let identity_recovery = f.identity_recovery_signature(1, &winner, 500);
    let all_ones = BytesN::from_array(&f.env, &[0xFFu8; 65]);
    let all_zero = BytesN::from_array(&f.env, &[0u8; 65]);

    for malformed in [
        bad_recovery_id,
        zero_r,
        zero_s,
        r_at_order,
        high_s,
        identity_recovery,
        all_ones,
        all_zero,
    ] {
        assert!(!verify_in_contract(&f, 1, &winner, 500, &malformed));
    }
}

#[test]
fn test_digest_is_bound_to_deployment() {
    let f = Fixture::new();
    let second = f.env.register(ContestPool, ());
    let winner = Address::generate(&f.env);

    let here = f.env.as_contract(&f.client.address, || {
        signature::payout_digest(&f.env, 1, &winner, 10).to_bytes()
    });
    let there = f.env.as_contract(&second, || {
        signature::payout_digest(&f.env, 1, &winner, 10).to_bytes()
    });

    assert_ne!(here, there);
    assert_eq!(here, f.client.payout_digest(&1, &winner, &10));
}

/// Off-chain signers encode addresses by hand; pin the XDR layout they rely on.
#[test]
fn test_contract_address_xdr_layout() {
    let f = Fixture::new();
    let xdr = f.client.address.clone().to_xdr(&f.env);

    assert_eq!(xdr.len(), 40);
    let mut prefix = [0u8; 8];
    xdr.slice(0..8).copy_into_slice(&mut prefix);
    // SCV_ADDRESS (18), SC_ADDRESS_TYPE_CONTRACT (1)
    assert_eq!(prefix, [0, 0, 0, 18, 0, 0, 0, 1]);
}

/// Fixed payout shared with the payout signer's own tests: both sides must
/// produce this digest.
const VECTOR_POOL: &str = "CDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBKN4";
const VECTOR_WINNER: &str = "GAIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCEIRCF6M";

/// sha256("Test SDF Network ; September 2015")
const TESTNET_NETWORK_ID: [u8; 32] = [
    0xCE, 0xE0, 0x30, 0x2D, 0x59, 0x84, 0x4D, 0x32, 0xBD, 0xCA, 0x91, 0x5C, 0x82, 0x03,
    0xDD, 0x44, 0xB3, 0x3F, 0xBB, 0x7E, 0xDC, 0x19, 0x05, 0x1E, 0xA3, 0x7A, 0xBE, 0xDF,
    0x28, 0xEC, 0xD4, 0x72,
];

const VECTOR_DIGEST: [u8; 32] = [
    0xC5, 0x04, 0x4B, 0xDD, 0x45, 0xE6, 0x67, 0xBB, 0x71, 0x35, 0xD4, 0xD8, 0x4C, 0x11,
    0x61, 0xE3, 0x7D, 0x4D, 0x17, 0x0D, 0xFA, 0x1A, 0xD9, 0xC0, 0x27, 0x2B, 0x88, 0xFC,
    0x66, 0xDC, 0x46, 0x16,
];

#[test]
fn test_payout_digest_matches_off_chain_vector() {
    let env = Env::default();
    env.ledger().set_network_id(TESTNET_NETWORK_ID);

    let pool = Address::from_string(&String::from_str(&env, VECTOR_POOL));
    env.register_at(&pool, ContestPool, ());
    let client = ContestPoolClient::new(&env, &pool);
    let winner = Address::from_string(&String::from_str(&env, VECTOR_WINNER));

    assert_eq!(client.payout_digest(&7, &winner, &294).to_array(), VECTOR_DIGEST);
}
