extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, Symbol, TryIntoVal, Val, Vec};

use crate::test_setup::{Fixture, START};
use crate::{
    ContestCreated, ContestDiscarded, ContestEnded, FeeUpdated, ParticipantJoined, RefundClaimed,
    WinnerDeclared, CONTEST_DURATION_SECS,
};

/// Assert the last published event came from the pool with the given topics,
/// and return its body.
fn last_event_body(f: &Fixture, topics: Vec<Val>) -> Val {
    let all_events = f.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, f.client.address);
    assert_eq!(last_event.1, topics);
    last_event.2
}

fn contest_topics(f: &Fixture, name: Symbol, contest_id: u64) -> Vec<Val> {
    vec![&f.env, name.into_val(&f.env), contest_id.into_val(&f.env)]
}

#[test]
fn test_contest_created_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);

    // Read before any other call replaces the recorded events.
    let body = last_event_body(&f, contest_topics(&f, symbol_short!("created"), id));
    let event: ContestCreated = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        ContestCreated {
            contest_id: id,
            creator: f.creator.clone(),
            entry_fee: 100,
            max_participants: 10,
            soft_cap: 250,
            end_time: START + CONTEST_DURATION_SECS,
        }
    );
}

#[test]
fn test_participant_joined_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);
    let alice = f.funded_account(100);
    f.client.join(&id, &alice);

    let body = last_event_body(&f, contest_topics(&f, symbol_short!("joined"), id));
    let event: ParticipantJoined = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        ParticipantJoined {
            contest_id: id,
            participant: alice,
            amount: 100,
        }
    );
}

#[test]
fn test_contest_ended_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);
    f.join_many(id, 3);
    f.advance_past_end(id);
    f.client.end_contest(&id, &f.creator);

    let body = last_event_body(&f, contest_topics(&f, symbol_short!("ended"), id));
    let event: ContestEnded = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        ContestEnded {
            contest_id: id,
            total_deposited: 300,
            fee: 6,
            prize_pool: 294,
        }
    );
}

#[test]
fn test_contest_discarded_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);
    f.join_many(id, 2);
    f.advance_past_end(id);
    f.client.discard_contest(&id, &f.creator);

    let body = last_event_body(&f, contest_topics(&f, symbol_short!("discarded"), id));
    let event: ContestDiscarded = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        ContestDiscarded {
            contest_id: id,
            total_deposited: 200,
        }
    );
}

#[test]
fn test_refund_claimed_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);
    let players = f.join_many(id, 1);
    f.advance_past_end(id);
    f.client.discard_contest(&id, &f.creator);
    f.client.claim_refund(&id, &players[0]);

    let body = last_event_body(&f, contest_topics(&f, symbol_short!("refunded"), id));
    let event: RefundClaimed = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        RefundClaimed {
            contest_id: id,
            participant: players[0].clone(),
            amount: 100,
        }
    );
}

#[test]
fn test_winner_declared_event() {
    let f = Fixture::new();
    let id = f.create_contest(100, 10, 250);
    let players = f.join_many(id, 3);
    f.advance_past_end(id);
    f.client.end_contest(&id, &f.creator);

    let signature = f.sign_payout(id, &players[2], 294);
    f.client
        .declare_winner(&id, &f.creator, &players[2], &294, &signature);

    let body = last_event_body(&f, contest_topics(&f, symbol_short!("winner"), id));
    let event: WinnerDeclared = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        WinnerDeclared {
            contest_id: id,
            winner: players[2].clone(),
            amount: 294,
        }
    );
}

#[test]
fn test_fee_updated_event() {
    let f = Fixture::new();
    f.client.update_fee(&f.admin, &7);

    let topics = vec![&f.env, symbol_short!("fee_upd").into_val(&f.env)];
    let body = last_event_body(&f, topics);
    let event: FeeUpdated = body.try_into_val(&f.env).unwrap();
    assert_eq!(
        event,
        FeeUpdated {
            old_fee_percent: 2,
            new_fee_percent: 7,
        }
    );
}
