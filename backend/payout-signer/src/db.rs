//! Database layer: migrations and payout authorization records.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::errors::{Result, SignerError};
use crate::signer::PayoutAuthorization;

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    init_pool_with(database_url, 5).await
}

pub async fn init_pool_with(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

#[derive(Debug, Clone, FromRow)]
pub struct AuthorizationRecord {
    pub contest_id: i64,
    pub winner: String,
    pub amount: String,
    pub digest: String,
    pub signature: String,
}

impl From<AuthorizationRecord> for PayoutAuthorization {
    fn from(record: AuthorizationRecord) -> Self {
        PayoutAuthorization {
            contest_id: record.contest_id as u64,
            winner: record.winner,
            amount: record.amount,
            digest: record.digest,
            signature: record.signature,
        }
    }
}

/// SQLite integers are signed; contest ids above `i64::MAX` cannot be stored.
pub fn contest_key(contest_id: u64) -> Result<i64> {
    i64::try_from(contest_id)
        .map_err(|_| SignerError::InvalidRequest(format!("contest id out of range: {contest_id}")))
}

pub async fn find_authorization(
    pool: &SqlitePool,
    contest_id: u64,
) -> Result<Option<AuthorizationRecord>> {
    let record = sqlx::query_as::<_, AuthorizationRecord>(
        r#"
        SELECT contest_id, winner, amount, digest, signature
        FROM   payout_authorizations
        WHERE  contest_id = ?1
        "#,
    )
    .bind(contest_key(contest_id)?)
    .fetch_optional(pool)
    .await?;
    Ok(record)
}

/// Persist an authorization. Returns `false` when the contest already has one,
/// leaving the stored row untouched.
pub async fn insert_authorization(pool: &SqlitePool, auth: &PayoutAuthorization) -> Result<bool> {
    let rows_affected = sqlx::query(
        r#"
        INSERT OR IGNORE INTO payout_authorizations
            (contest_id, winner, amount, digest, signature, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(contest_key(auth.contest_id)?)
    .bind(&auth.winner)
    .bind(&auth.amount)
    .bind(&auth.digest)
    .bind(&auth.signature)
    .bind(chrono::Utc::now().timestamp())
    .execute(pool)
    .await?
    .rows_affected();

    Ok(rows_affected == 1)
}
