//! # Contest Pool Contract
//!
//! Escrow-based contest pool. A creator opens a contest with an entry fee,
//! a participant cap and a soft cap; users deposit the entry fee to join.
//! Once the six-hour window closes the creator either ends the contest
//! (soft cap met: platform fee paid, prize pool released to a winner on
//! presentation of the creator's off-chain signature) or discards it (soft
//! cap missed: every participant may reclaim their entry fee).
//!
//! | Phase        | Entry Point(s)                                   |
//! |--------------|--------------------------------------------------|
//! | Bootstrap    | [`ContestPool::init`]                            |
//! | Admin        | [`ContestPool::update_fee`]                      |
//! | Creation     | [`ContestPool::create_contest`]                  |
//! | Funding      | [`ContestPool::join`]                            |
//! | Resolution   | `end_contest`, `discard_contest`                 |
//! | Payout       | `declare_winner`, `claim_refund`                 |
//! | Queries      | `get_contest`, `get_participants`, `is_participant`, `has_refunded`, `fee_percent`, `contest_count`, `payout_digest` |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], escrow accounting and token
//! movement to [`escrow`], payout authorization to [`signature`]. This file
//! holds the entry points and the lifecycle guards.
//!
//! Every entry point finishes its state writes before any outgoing token
//! transfer, and every failure rolls the whole invocation back.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, String, Vec};

mod escrow;
mod events;
pub mod signature;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_signature;

pub use events::{
    ContestCreated, ContestDiscarded, ContestEnded, FeeUpdated, ParticipantJoined, RefundClaimed,
    WinnerDeclared,
};
pub use escrow::{DEFAULT_FEE_PERCENT, MAX_FEE_PERCENT};
pub use types::{Contest, ContestStatus};

/// Time between creation and the close of the join window (6 hours).
pub const CONTEST_DURATION_SECS: u64 = 6 * 60 * 60;

/// Upper bound on `max_participants`; the participant list is a single ledger entry.
pub const MAX_PARTICIPANTS: u32 = 1_000;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    ContestNotFound = 4,
    InvalidParams = 5,
    InvalidAmount = 6,
    FeeTooHigh = 7,
    NotActive = 8,
    NotStarted = 9,
    Expired = 10,
    AlreadyJoined = 11,
    CapacityReached = 12,
    NotCreator = 13,
    NotEnded = 14,
    SoftCapNotReached = 15,
    SoftCapReached = 16,
    NotDiscarded = 17,
    NotParticipant = 18,
    AlreadyRefunded = 19,
    StillActive = 20,
    ExceedsAvailable = 21,
    AlreadyClaimed = 22,
    InvalidSignature = 23,
    Overflow = 24,
    Reentrant = 25,
}

#[contract]
pub struct ContestPool;

#[contractimpl]
impl ContestPool {
    // ─────────────────────────────────────────────────────────
    // Initialisation and administration
    // ─────────────────────────────────────────────────────────

    /// Initialise the pool with its administrator and escrowed token.
    ///
    /// Must be called exactly once immediately after deployment. The
    /// administrator receives platform fees and may change the fee percentage.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_config(&env, &admin, &token, escrow::DEFAULT_FEE_PERCENT);
        Ok(())
    }

    /// Change the platform fee applied to contests ended from now on.
    ///
    /// Contests already ended keep the split computed when they ended.
    pub fn update_fee(env: Env, caller: Address, new_fee_percent: u32) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;
        if caller != storage::get_admin(&env)? {
            return Err(Error::NotAuthorized);
        }
        if new_fee_percent > escrow::MAX_FEE_PERCENT {
            return Err(Error::FeeTooHigh);
        }

        let old_fee_percent = storage::get_fee_percent(&env)?;
        storage::set_fee_percent(&env, new_fee_percent);

        events::fee_updated(
            &env,
            FeeUpdated {
                old_fee_percent,
                new_fee_percent,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Contest lifecycle
    // ─────────────────────────────────────────────────────────

    /// Open a new contest. The join window starts now and closes after
    /// [`CONTEST_DURATION_SECS`].
    ///
    /// `signer` is the creator's uncompressed secp256k1 public key; winner
    /// payouts must carry a signature from it.
    #[allow(clippy::too_many_arguments)]
    pub fn create_contest(
        env: Env,
        creator: Address,
        signer: BytesN<65>,
        name: String,
        description: String,
        entry_fee: i128,
        max_participants: u32,
        soft_cap: i128,
    ) -> Result<u64, Error> {
        creator.require_auth();
        escrow::ensure_unlocked(&env)?;
        // Token must be configured before any contest can take deposits.
        storage::get_token(&env)?;

        if entry_fee <= 0 || soft_cap < 0 {
            return Err(Error::InvalidParams);
        }
        if max_participants == 0 || max_participants > MAX_PARTICIPANTS {
            return Err(Error::InvalidParams);
        }
        // Full participation must be representable.
        entry_fee
            .checked_mul(max_participants as i128)
            .ok_or(Error::InvalidParams)?;

        let now = env.ledger().timestamp();
        let end_time = now
            .checked_add(CONTEST_DURATION_SECS)
            .ok_or(Error::Overflow)?;
        let id = storage::get_and_increment_contest_id(&env)?;

        storage::save_new_contest(
            &env,
            &types::ContestConfig {
                id,
                creator: creator.clone(),
                signer,
                name,
                description,
                entry_fee,
                max_participants,
                soft_cap,
                start_time: now,
                end_time,
            },
        );

        events::contest_created(
            &env,
            ContestCreated {
                contest_id: id,
                creator,
                entry_fee,
                max_participants,
                soft_cap,
                end_time,
            },
        );
        Ok(id)
    }

    /// Deposit the entry fee and join an open contest.
    ///
    /// Accepted while `start_time <= now <= end_time`.
    pub fn join(env: Env, contest_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;

        let config = storage::load_contest_config(&env, contest_id)?;
        let mut state = storage::load_contest_state(&env, contest_id)?;

        if state.status != ContestStatus::Open {
            return Err(Error::NotActive);
        }
        let now = env.ledger().timestamp();
        if now < config.start_time {
            return Err(Error::NotStarted);
        }
        if now > config.end_time {
            return Err(Error::Expired);
        }
        if storage::is_participant(&env, contest_id, &caller) {
            return Err(Error::AlreadyJoined);
        }
        if state.participant_count >= config.max_participants {
            return Err(Error::CapacityReached);
        }

        escrow::record_deposit(&mut state, &config)?;
        storage::add_participant(&env, contest_id, &caller)?;
        storage::save_contest_state(&env, contest_id, &state);

        // A failed pull aborts the invocation and discards the writes above.
        escrow::collect(&env, &caller, config.entry_fee)?;

        events::participant_joined(
            &env,
            ParticipantJoined {
                contest_id,
                participant: caller,
                amount: config.entry_fee,
            },
        );
        Ok(())
    }

    /// Close a funded contest: compute the fee / prize pool split and pay the
    /// platform fee to the administrator.
    pub fn end_contest(env: Env, contest_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;

        let config = storage::load_contest_config(&env, contest_id)?;
        let mut state = storage::load_contest_state(&env, contest_id)?;
        Self::require_closable(&env, &config, &state, &caller)?;

        if state.total_deposited < config.soft_cap {
            return Err(Error::SoftCapNotReached);
        }

        let split = escrow::split(state.total_deposited, storage::get_fee_percent(&env)?)?;
        state.status = ContestStatus::Ended;
        state.prize_pool = split.prize_pool;
        escrow::record_withdrawal(&mut state, split.fee)?;
        storage::save_contest_state(&env, contest_id, &state);

        escrow::release(&env, &storage::get_admin(&env)?, split.fee)?;

        events::contest_ended(
            &env,
            ContestEnded {
                contest_id,
                total_deposited: state.total_deposited,
                fee: split.fee,
                prize_pool: split.prize_pool,
            },
        );
        Ok(())
    }

    /// Close an underfunded contest and open it for refunds.
    pub fn discard_contest(env: Env, contest_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;

        let config = storage::load_contest_config(&env, contest_id)?;
        let mut state = storage::load_contest_state(&env, contest_id)?;
        Self::require_closable(&env, &config, &state, &caller)?;

        if state.total_deposited >= config.soft_cap {
            return Err(Error::SoftCapReached);
        }

        state.status = ContestStatus::Discarded;
        storage::save_contest_state(&env, contest_id, &state);

        events::contest_discarded(
            &env,
            ContestDiscarded {
                contest_id,
                total_deposited: state.total_deposited,
            },
        );
        Ok(())
    }

    /// Reclaim the entry fee from a discarded contest. Once per participant.
    pub fn claim_refund(env: Env, contest_id: u64, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;

        let config = storage::load_contest_config(&env, contest_id)?;
        let mut state = storage::load_contest_state(&env, contest_id)?;

        if state.status != ContestStatus::Discarded {
            return Err(Error::NotDiscarded);
        }
        if !storage::is_participant(&env, contest_id, &caller) {
            return Err(Error::NotParticipant);
        }
        if storage::has_refunded(&env, contest_id, &caller) {
            return Err(Error::AlreadyRefunded);
        }

        escrow::record_withdrawal(&mut state, config.entry_fee)?;
        storage::mark_refunded(&env, contest_id, &caller);
        storage::save_contest_state(&env, contest_id, &state);

        escrow::release(&env, &caller, config.entry_fee)?;

        events::refund_claimed(
            &env,
            RefundClaimed {
                contest_id,
                participant: caller,
                amount: config.entry_fee,
            },
        );
        Ok(())
    }

    /// Pay `amount` from an ended contest's escrow to `winner`.
    ///
    /// `signature` must be the creator's `signer` key signing
    /// [`signature::payout_digest`] for exactly `(contest_id, winner, amount)`.
    /// Only one declaration per contest ever succeeds.
    pub fn declare_winner(
        env: Env,
        contest_id: u64,
        caller: Address,
        winner: Address,
        amount: i128,
        signature: BytesN<65>,
    ) -> Result<(), Error> {
        caller.require_auth();
        escrow::ensure_unlocked(&env)?;

        let config = storage::load_contest_config(&env, contest_id)?;
        let mut state = storage::load_contest_state(&env, contest_id)?;

        if caller != config.creator {
            return Err(Error::NotCreator);
        }
        if state.status != ContestStatus::Ended {
            return Err(Error::StillActive);
        }
        if state.prize_claimed {
            return Err(Error::AlreadyClaimed);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount > escrow::available(&state)? {
            return Err(Error::ExceedsAvailable);
        }
        if !signature::verify(&env, contest_id, &winner, amount, &signature, &config.signer) {
            return Err(Error::InvalidSignature);
        }

        state.prize_claimed = true;
        state.winner = Some(winner.clone());
        escrow::record_withdrawal(&mut state, amount)?;
        storage::save_contest_state(&env, contest_id, &state);

        escrow::release(&env, &winner, amount)?;

        events::winner_declared(
            &env,
            WinnerDeclared {
                contest_id,
                winner,
                amount,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn get_contest(env: Env, contest_id: u64) -> Result<Contest, Error> {
        storage::load_contest(&env, contest_id)
    }

    /// Participants in join order.
    pub fn get_participants(env: Env, contest_id: u64) -> Result<Vec<Address>, Error> {
        storage::load_participants(&env, contest_id)
    }

    pub fn is_participant(env: Env, contest_id: u64, account: Address) -> bool {
        storage::is_participant(&env, contest_id, &account)
    }

    pub fn has_refunded(env: Env, contest_id: u64, account: Address) -> bool {
        storage::has_refunded(&env, contest_id, &account)
    }

    pub fn fee_percent(env: Env) -> Result<u32, Error> {
        storage::get_fee_percent(&env)
    }

    pub fn contest_count(env: Env) -> u64 {
        storage::get_contest_count(&env)
    }

    /// The digest a creator signs to authorize `declare_winner` with these
    /// arguments. Lets off-chain signers check their encoding.
    pub fn payout_digest(env: Env, contest_id: u64, winner: Address, amount: i128) -> BytesN<32> {
        signature::payout_digest(&env, contest_id, &winner, amount).to_bytes()
    }
}

impl ContestPool {
    /// Shared guards for `end_contest` / `discard_contest`.
    fn require_closable(
        env: &Env,
        config: &types::ContestConfig,
        state: &types::ContestState,
        caller: &Address,
    ) -> Result<(), Error> {
        if *caller != config.creator {
            return Err(Error::NotCreator);
        }
        if state.status != ContestStatus::Open {
            return Err(Error::NotActive);
        }
        if env.ledger().timestamp() <= config.end_time {
            return Err(Error::NotEnded);
        }
        Ok(())
    }
}
