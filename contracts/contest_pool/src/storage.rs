//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the pool:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type      | Description                              |
//! |----------------|-----------|------------------------------------------|
//! | `Admin`        | `Address` | Platform administrator / fee recipient   |
//! | `Token`        | `Address` | Escrowed asset (SEP-41 token)            |
//! | `FeePercent`   | `u32`     | Platform fee applied at `end_contest`    |
//! | `ContestCount` | `u64`     | Auto-increment contest ID counter        |
//! | `Locked`       | `bool`    | Reentrancy latch around token transfers  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type            | Description                   |
//! |-----------------------|-----------------|-------------------------------|
//! | `Config(id)`          | `ContestConfig` | Immutable contest parameters  |
//! | `State(id)`           | `ContestState`  | Status and escrow totals      |
//! | `Participants(id)`    | `Vec<Address>`  | Join-ordered participant list |
//! | `Member(id, addr)`    | `bool`          | Membership flag               |
//! | `Refunded(id, addr)`  | `bool`          | Refund-claimed flag           |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Membership and refund flags are keyed by contest, so each contest owns its
//! own account → bool maps and no cross-contest structure exists.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::types::{Contest, ContestConfig, ContestState};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Platform administrator (Instance).
    Admin,
    /// Escrowed token contract (Instance).
    Token,
    /// Platform fee percentage (Instance).
    FeePercent,
    /// Global auto-increment counter for contest IDs (Instance).
    ContestCount,
    /// Reentrancy latch (Instance).
    Locked,
    /// Immutable contest configuration keyed by ID (Persistent).
    Config(u64),
    /// Mutable contest state keyed by ID (Persistent).
    State(u64),
    /// Ordered participant list keyed by ID (Persistent).
    Participants(u64),
    /// Participant membership flag (Persistent).
    Member(u64, Address),
    /// Refund-claimed flag (Persistent).
    Refunded(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

/// Write the platform configuration. Called once from `init`.
pub fn set_config(env: &Env, admin: &Address, token: &Address, fee_percent: u32) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::FeePercent, &fee_percent);
    bump_instance(env);
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn get_fee_percent(env: &Env) -> Result<u32, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::FeePercent)
        .ok_or(Error::NotInitialized)
}

pub fn set_fee_percent(env: &Env, fee_percent: u32) {
    env.storage()
        .instance()
        .set(&DataKey::FeePercent, &fee_percent);
    bump_instance(env);
}

/// Number of contests created so far (also the next ID to be assigned).
pub fn get_contest_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ContestCount)
        .unwrap_or(0)
}

/// Reads, increments, and stores the contest counter.
/// Returns the ID to use for the *current* contest (pre-increment value).
pub fn get_and_increment_contest_id(env: &Env) -> Result<u64, Error> {
    bump_instance(env);
    let current = get_contest_count(env);
    let next = current.checked_add(1).ok_or(Error::Overflow)?;
    env.storage()
        .instance()
        .set(&DataKey::ContestCount, &next);
    Ok(current)
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    if locked {
        env.storage().instance().set(&DataKey::Locked, &true);
    } else {
        env.storage().instance().remove(&DataKey::Locked);
    }
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save the config, the initial state and an empty participant list for a
/// freshly created contest.
pub fn save_new_contest(env: &Env, config: &ContestConfig) {
    let config_key = DataKey::Config(config.id);
    let state_key = DataKey::State(config.id);
    let participants_key = DataKey::Participants(config.id);

    let persistent = env.storage().persistent();
    persistent.set(&config_key, config);
    persistent.set(&state_key, &ContestState::open());
    persistent.set(&participants_key, &Vec::<Address>::new(env));
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
    bump_persistent(env, &participants_key);
}

/// Load the full `Contest` by combining config and state.
pub fn load_contest(env: &Env, id: u64) -> Result<Contest, Error> {
    let config = load_contest_config(env, id)?;
    let state = load_contest_state(env, id)?;
    Ok(Contest::from_parts(config, state))
}

/// Load only the immutable contest configuration.
pub fn load_contest_config(env: &Env, id: u64) -> Result<ContestConfig, Error> {
    let key = DataKey::Config(id);
    let config: ContestConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ContestNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load only the mutable contest state.
pub fn load_contest_state(env: &Env, id: u64) -> Result<ContestState, Error> {
    let key = DataKey::State(id);
    let state: ContestState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ContestNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

pub fn save_contest_state(env: &Env, id: u64, state: &ContestState) {
    let key = DataKey::State(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

pub fn load_participants(env: &Env, id: u64) -> Result<Vec<Address>, Error> {
    let key = DataKey::Participants(id);
    let participants: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ContestNotFound)?;
    bump_persistent(env, &key);
    Ok(participants)
}

/// Append `account` to the participant list and set its membership flag.
pub fn add_participant(env: &Env, id: u64, account: &Address) -> Result<(), Error> {
    let mut participants = load_participants(env, id)?;
    participants.push_back(account.clone());

    let list_key = DataKey::Participants(id);
    let member_key = DataKey::Member(id, account.clone());
    let persistent = env.storage().persistent();
    persistent.set(&list_key, &participants);
    persistent.set(&member_key, &true);
    bump_persistent(env, &list_key);
    bump_persistent(env, &member_key);
    Ok(())
}

pub fn is_participant(env: &Env, id: u64, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Member(id, account.clone()))
        .unwrap_or(false)
}

pub fn has_refunded(env: &Env, id: u64, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Refunded(id, account.clone()))
        .unwrap_or(false)
}

pub fn mark_refunded(env: &Env, id: u64, account: &Address) {
    let key = DataKey::Refunded(id, account.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
