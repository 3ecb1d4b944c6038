//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::errors::SignerError;
use crate::payouts::{self, PayoutRequest};
use crate::signer::PayoutSigner;

pub struct ApiState {
    pub pool: SqlitePool,
    pub signer: PayoutSigner,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct SignerResponse {
    pub public_key: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: SignerError) -> Response {
    let status = match &err {
        SignerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        SignerError::Conflict { .. } => StatusCode::CONFLICT,
        SignerError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => {
            error!("Request failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /signer`
///
/// The key creators pass as `signer` when creating a contest.
pub async fn get_signer(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(SignerResponse {
        public_key: state.signer.public_key_hex(),
    })
}

/// `POST /payouts`
///
/// Signs the winner declaration for a contest. Repeating an identical request
/// returns the stored authorization; a different payout for the same contest
/// is refused with `409`.
pub async fn create_payout(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<PayoutRequest>,
) -> Response {
    match payouts::issue(&state.pool, &state.signer, &request).await {
        Ok(auth) => (StatusCode::OK, Json(auth)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /payouts/:contest_id`
pub async fn get_payout(
    State(state): State<Arc<ApiState>>,
    Path(contest_id): Path<u64>,
) -> Response {
    match payouts::lookup(&state.pool, contest_id).await {
        Ok(auth) => (StatusCode::OK, Json(auth)).into_response(),
        Err(e) => error_response(e),
    }
}
