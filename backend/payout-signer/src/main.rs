//! Contest Pool Payout Signer: entry point.
//!
//! Holds a contest creator's secp256k1 key and issues signed winner
//! declarations for the contest pool contract's `declare_winner`. Every
//! authorization is recorded in SQLite so a contest is never signed for two
//! different payouts.

mod api;
mod config;
mod db;
mod errors;
mod payload;
mod payouts;
mod signer;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use signer::PayoutSigner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;
    let signer = PayoutSigner::from_config(&config).map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        contract_id = %config.contract_id,
        public_key = %signer.public_key_hex(),
        "Payout signer loaded"
    );

    let pool = db::init_pool(&config.database_url).await?;

    let api_state = Arc::new(api::ApiState { pool, signer });

    let app = Router::new()
        .route("/health", get(api::health))
        .route("/signer", get(api::get_signer))
        .route("/payouts", post(api::create_payout))
        .route("/payouts/:contest_id", get(api::get_payout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(api_state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
