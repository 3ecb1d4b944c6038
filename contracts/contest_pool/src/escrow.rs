//! # Escrow ledger
//!
//! Per-contest accounting for everything the pool holds:
//!
//! - entry fees flowing in on `join` ([`record_deposit`]);
//! - the platform fee / prize pool split computed at `end_contest` ([`split`]);
//! - every value leaving escrow (fee, refunds, prize) through
//!   [`record_withdrawal`], which refuses to let `total_withdrawn` pass
//!   `total_deposited`.
//!
//! Token movement goes through [`collect`] and [`release`], which hold the
//! reentrancy latch for the duration of the external `transfer` call.
//! Callers persist their state changes *before* calling `release`.

use soroban_sdk::{token, Address, Env};

use crate::storage;
use crate::types::{ContestConfig, ContestState};
use crate::Error;

/// Fee percentage applied until the administrator changes it.
pub const DEFAULT_FEE_PERCENT: u32 = 2;
/// Upper bound accepted by `update_fee`.
pub const MAX_FEE_PERCENT: u32 = 10;

/// Result of splitting a contest's deposits at `end_contest`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Split {
    pub fee: i128,
    pub prize_pool: i128,
}

/// `fee = floor(total * fee_percent / 100)`, the remainder is the prize pool.
///
/// Truncation leaves the rounding remainder in the prize pool.
pub fn split(total_deposited: i128, fee_percent: u32) -> Result<Split, Error> {
    if total_deposited < 0 {
        return Err(Error::InvalidAmount);
    }
    if fee_percent > MAX_FEE_PERCENT {
        return Err(Error::FeeTooHigh);
    }
    let fee = total_deposited
        .checked_mul(fee_percent as i128)
        .ok_or(Error::Overflow)?
        / 100;
    let prize_pool = total_deposited.checked_sub(fee).ok_or(Error::Overflow)?;
    Ok(Split { fee, prize_pool })
}

/// Credit one entry fee to the contest.
pub fn record_deposit(state: &mut ContestState, config: &ContestConfig) -> Result<(), Error> {
    state.total_deposited = state
        .total_deposited
        .checked_add(config.entry_fee)
        .ok_or(Error::Overflow)?;
    state.participant_count = state
        .participant_count
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    Ok(())
}

/// Funds still held in escrow for this contest.
pub fn available(state: &ContestState) -> Result<i128, Error> {
    state
        .total_deposited
        .checked_sub(state.total_withdrawn)
        .ok_or(Error::Overflow)
}

/// Debit `amount` from the contest's escrow.
///
/// Every outflow goes through here, so `total_withdrawn <= total_deposited`
/// holds regardless of which path (fee, refund, prize) is paying out.
pub fn record_withdrawal(state: &mut ContestState, amount: i128) -> Result<(), Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    if amount > available(state)? {
        return Err(Error::ExceedsAvailable);
    }
    state.total_withdrawn = state
        .total_withdrawn
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    Ok(())
}

/// Fail if a token transfer is currently in flight.
pub fn ensure_unlocked(env: &Env) -> Result<(), Error> {
    if storage::is_locked(env) {
        return Err(Error::Reentrant);
    }
    Ok(())
}

/// Pull `amount` from `payer` into the pool.
pub fn collect(env: &Env, payer: &Address, amount: i128) -> Result<(), Error> {
    transfer_locked(env, payer, &env.current_contract_address(), amount)
}

/// Pay `amount` out of the pool to `recipient`. Zero amounts are skipped.
pub fn release(env: &Env, recipient: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    transfer_locked(env, &env.current_contract_address(), recipient, amount)
}

fn transfer_locked(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    ensure_unlocked(env)?;
    let token = storage::get_token(env)?;

    storage::set_locked(env, true);
    token::Client::new(env, &token).transfer(from, to, &amount);
    storage::set_locked(env, false);
    Ok(())
}
