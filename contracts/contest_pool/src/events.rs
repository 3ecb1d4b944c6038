//! # Events
//!
//! Every state-changing entry point publishes exactly one event, after its
//! token transfers have completed. Topics are `(symbol, contest_id)`;
//! bodies are the structs below.
//!
//! | Topic        | Body                |
//! |--------------|---------------------|
//! | `created`    | [`ContestCreated`]  |
//! | `joined`     | [`ParticipantJoined`] |
//! | `ended`      | [`ContestEnded`]    |
//! | `discarded`  | [`ContestDiscarded`] |
//! | `winner`     | [`WinnerDeclared`]  |
//! | `refunded`   | [`RefundClaimed`]   |
//! | `fee_upd`    | [`FeeUpdated`] (topic has no contest id) |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestCreated {
    pub contest_id: u64,
    pub creator: Address,
    pub entry_fee: i128,
    pub max_participants: u32,
    pub soft_cap: i128,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantJoined {
    pub contest_id: u64,
    pub participant: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestEnded {
    pub contest_id: u64,
    pub total_deposited: i128,
    pub fee: i128,
    pub prize_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContestDiscarded {
    pub contest_id: u64,
    pub total_deposited: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinnerDeclared {
    pub contest_id: u64,
    pub winner: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundClaimed {
    pub contest_id: u64,
    pub participant: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeUpdated {
    pub old_fee_percent: u32,
    pub new_fee_percent: u32,
}

pub fn contest_created(env: &Env, event: ContestCreated) {
    env.events()
        .publish((symbol_short!("created"), event.contest_id), event);
}

pub fn participant_joined(env: &Env, event: ParticipantJoined) {
    env.events()
        .publish((symbol_short!("joined"), event.contest_id), event);
}

pub fn contest_ended(env: &Env, event: ContestEnded) {
    env.events()
        .publish((symbol_short!("ended"), event.contest_id), event);
}

pub fn contest_discarded(env: &Env, event: ContestDiscarded) {
    env.events()
        .publish((symbol_short!("discarded"), event.contest_id), event);
}

pub fn winner_declared(env: &Env, event: WinnerDeclared) {
    env.events()
        .publish((symbol_short!("winner"), event.contest_id), event);
}

pub fn refund_claimed(env: &Env, event: RefundClaimed) {
    env.events()
        .publish((symbol_short!("refunded"), event.contest_id), event);
}

pub fn fee_updated(env: &Env, event: FeeUpdated) {
    env.events().publish((symbol_short!("fee_upd"),), event);
}
