//! Payout issuance: validate, sign once per contest, persist.

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db;
use crate::errors::{Result, SignerError};
use crate::payload;
use crate::signer::{PayoutAuthorization, PayoutSigner};

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutRequest {
    pub contest_id: u64,
    pub winner: String,
    pub amount: String,
}

/// Sign a payout for `request`, or return the one already issued for the
/// contest when it names the same winner and amount.
pub async fn issue(
    pool: &SqlitePool,
    signer: &PayoutSigner,
    request: &PayoutRequest,
) -> Result<PayoutAuthorization> {
    let amount = payload::parse_amount(&request.amount)?;
    let winner = request.winner.trim();
    // Validates the strkey before touching storage.
    payload::address_xdr(winner)?;

    if let Some(existing) = db::find_authorization(pool, request.contest_id).await? {
        return reuse(existing.into(), winner, amount);
    }

    let auth = signer.sign(request.contest_id, winner, amount)?;
    if db::insert_authorization(pool, &auth).await? {
        info!(
            contest_id = auth.contest_id,
            winner = %auth.winner,
            amount = %auth.amount,
            "Payout authorized"
        );
        return Ok(auth);
    }

    // Lost a race with a concurrent request for the same contest.
    let stored = db::find_authorization(pool, request.contest_id)
        .await?
        .ok_or(SignerError::NotFound(request.contest_id))?;
    reuse(stored.into(), winner, amount)
}

pub async fn lookup(pool: &SqlitePool, contest_id: u64) -> Result<PayoutAuthorization> {
    db::find_authorization(pool, contest_id)
        .await?
        .map(Into::into)
        .ok_or(SignerError::NotFound(contest_id))
}

fn reuse(existing: PayoutAuthorization, winner: &str, amount: i128) -> Result<PayoutAuthorization> {
    if existing.winner == winner && existing.amount == amount.to_string() {
        return Ok(existing);
    }
    warn!(
        contest_id = existing.contest_id,
        authorized_winner = %existing.winner,
        requested_winner = %winner,
        "Refusing second payout for contest"
    );
    Err(SignerError::Conflict {
        contest_id: existing.contest_id,
    })
}
