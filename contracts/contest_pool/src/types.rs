//! # Types
//!
//! Shared data structures used across all modules of the contest pool.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Contest` is internally stored as two separate ledger entries:
//!
//! - [`ContestConfig`]: written once at creation; never mutated.
//! - [`ContestState`]: written on every join, on end/discard, on refunds and
//!   on the winner payout.
//!
//! The participant list and the per-account membership / refund flags live in
//! their own keys (see `storage`). The public API exposes the reconstructed
//! [`Contest`] struct for convenience.
//!
//! ### Status as a Finite-State Machine
//!
//! ```text
//! Open ──► Ended       (total_deposited >= soft_cap, after end_time)
//!   └────► Discarded   (total_deposited <  soft_cap, after end_time)
//! ```
//!
//! Both `Ended` and `Discarded` are terminal.

use soroban_sdk::{contracttype, Address, BytesN, String};

/// Lifecycle status of a contest.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContestStatus {
    /// Accepting participants until `end_time`.
    Open,
    /// Soft cap reached; fee paid out, prize pool awaiting a winner.
    Ended,
    /// Soft cap missed; participants may reclaim their entry fee.
    Discarded,
}

/// Immutable contest configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestConfig {
    pub id: u64,
    pub creator: Address,
    /// Uncompressed SEC1 secp256k1 key that signs winner payouts.
    pub signer: BytesN<65>,
    pub name: String,
    pub description: String,
    pub entry_fee: i128,
    pub max_participants: u32,
    pub soft_cap: i128,
    pub start_time: u64,
    pub end_time: u64,
}

/// Mutable contest state: status plus the escrow ledger for this contest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestState {
    pub status: ContestStatus,
    pub participant_count: u32,
    pub total_deposited: i128,
    /// Everything that left escrow: the platform fee taken at end, refunds,
    /// and the prize. Not only the winner payout; counting the fee keeps
    /// `total_deposited - total_withdrawn == prize_pool` once ended.
    pub total_withdrawn: i128,
    pub prize_pool: i128,
    pub winner: Option<Address>,
    pub prize_claimed: bool,
}

impl ContestState {
    pub fn open() -> Self {
        Self {
            status: ContestStatus::Open,
            participant_count: 0,
            total_deposited: 0,
            total_withdrawn: 0,
            prize_pool: 0,
            winner: None,
            prize_claimed: false,
        }
    }
}

/// Full on-chain representation of a contest.
///
/// Used as the public API return type; reconstructed internally from
/// the split `ContestConfig` + `ContestState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Contest {
    /// Unique identifier (auto-incremented from 0).
    pub id: u64,
    /// Address that created the contest; the only one allowed to resolve it.
    pub creator: Address,
    /// Public key whose signatures authorize the winner payout.
    pub signer: BytesN<65>,
    pub name: String,
    pub description: String,
    /// Deposit taken from every participant.
    pub entry_fee: i128,
    pub max_participants: u32,
    /// Minimum total deposit for the contest to be resolved with a winner.
    pub soft_cap: i128,
    /// Ledger timestamp at creation.
    pub start_time: u64,
    /// Last ledger timestamp at which `join` is accepted.
    pub end_time: u64,
    pub status: ContestStatus,
    pub participant_count: u32,
    pub total_deposited: i128,
    /// Platform fee, refunds and prize combined; see [`ContestState`].
    pub total_withdrawn: i128,
    /// Set once by `end_contest`; zero before that.
    pub prize_pool: i128,
    pub winner: Option<Address>,
    pub prize_claimed: bool,
}

impl Contest {
    pub fn from_parts(config: ContestConfig, state: ContestState) -> Self {
        Contest {
            id: config.id,
            creator: config.creator,
            signer: config.signer,
            name: config.name,
            description: config.description,
            entry_fee: config.entry_fee,
            max_participants: config.max_participants,
            soft_cap: config.soft_cap,
            start_time: config.start_time,
            end_time: config.end_time,
            status: state.status,
            participant_count: state.participant_count,
            total_deposited: state.total_deposited,
            total_withdrawn: state.total_withdrawn,
            prize_pool: state.prize_pool,
            winner: state.winner,
            prize_claimed: state.prize_claimed,
        }
    }
}
