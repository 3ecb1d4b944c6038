#![allow(dead_code)]

extern crate std;

use crate::types::{Contest, ContestStatus};

/// INV-1: Participant count never exceeds the configured cap.
pub fn assert_within_capacity(contest: &Contest, participants_len: u32) {
    assert_eq!(
        contest.participant_count, participants_len,
        "INV-1 violated: contest {} counts {} participants but lists {}",
        contest.id, contest.participant_count, participants_len
    );
    assert!(
        participants_len <= contest.max_participants,
        "INV-1 violated: contest {} has {} participants, cap {}",
        contest.id,
        participants_len,
        contest.max_participants
    );
}

/// INV-2: Every participant paid exactly one entry fee.
pub fn assert_deposits_match_participants(contest: &Contest) {
    assert_eq!(
        contest.total_deposited,
        contest.participant_count as i128 * contest.entry_fee,
        "INV-2 violated: contest {} deposited {} for {} participants at {}",
        contest.id,
        contest.total_deposited,
        contest.participant_count,
        contest.entry_fee
    );
}

/// INV-3: Escrow never pays out more than it took in.
pub fn assert_withdrawn_within_deposited(contest: &Contest) {
    assert!(
        contest.total_withdrawn >= 0 && contest.total_withdrawn <= contest.total_deposited,
        "INV-3 violated: contest {} withdrew {} of {}",
        contest.id,
        contest.total_withdrawn,
        contest.total_deposited
    );
}

/// INV-4: Terminal states agree with the soft cap.
pub fn assert_status_matches_soft_cap(contest: &Contest) {
    match contest.status {
        ContestStatus::Open => {}
        ContestStatus::Ended => assert!(
            contest.total_deposited >= contest.soft_cap,
            "INV-4 violated: contest {} ended below soft cap",
            contest.id
        ),
        ContestStatus::Discarded => assert!(
            contest.total_deposited < contest.soft_cap,
            "INV-4 violated: contest {} discarded at or above soft cap",
            contest.id
        ),
    }
}

/// INV-5: A claimed prize implies an ended contest with a recorded winner.
pub fn assert_claim_consistent(contest: &Contest) {
    if contest.prize_claimed {
        assert_eq!(
            contest.status,
            ContestStatus::Ended,
            "INV-5 violated: contest {} claimed while {:?}",
            contest.id,
            contest.status
        );
        assert!(
            contest.winner.is_some(),
            "INV-5 violated: contest {} claimed without a winner",
            contest.id
        );
    } else {
        assert!(
            contest.winner.is_none(),
            "INV-5 violated: contest {} has a winner but no claim",
            contest.id
        );
    }
}

/// INV-6: Only forward transitions out of Open are allowed.
pub fn assert_valid_status_transition(from: &ContestStatus, to: &ContestStatus) {
    let valid = from == to
        || matches!(
            (from, to),
            (ContestStatus::Open, ContestStatus::Ended)
                | (ContestStatus::Open, ContestStatus::Discarded)
        );

    assert!(
        valid,
        "INV-6 violated: invalid status transition from {:?} to {:?}",
        from, to
    );
}

/// INV-7: Creation-time fields never change.
pub fn assert_contest_immutable_fields(original: &Contest, current: &Contest) {
    assert_eq!(original.id, current.id, "INV-7 violated: id changed");
    assert_eq!(
        original.creator, current.creator,
        "INV-7 violated: creator changed"
    );
    assert_eq!(original.signer, current.signer, "INV-7 violated: signer changed");
    assert_eq!(
        original.entry_fee, current.entry_fee,
        "INV-7 violated: entry_fee changed"
    );
    assert_eq!(
        original.max_participants, current.max_participants,
        "INV-7 violated: max_participants changed"
    );
    assert_eq!(
        original.soft_cap, current.soft_cap,
        "INV-7 violated: soft_cap changed"
    );
    assert_eq!(
        (original.start_time, original.end_time),
        (current.start_time, current.end_time),
        "INV-7 violated: contest window changed"
    );
}

/// Run all stateless contest invariants.
pub fn assert_all_contest_invariants(contest: &Contest, participants_len: u32) {
    assert_within_capacity(contest, participants_len);
    assert_deposits_match_participants(contest);
    assert_withdrawn_within_deposited(contest);
    assert_status_matches_soft_cap(contest);
    assert_claim_consistent(contest);
}
