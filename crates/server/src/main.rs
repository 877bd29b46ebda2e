//! Beyond Server - Marketplace HTTP API.
//!
//! This binary serves the marketplace API on port 5000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, plain JSON request/response
//! - `PostgreSQL` for accounts, experience listings, and bookings
//! - One logical store call per request; no sessions, no caching layer
//!
//! Listings carry their images inline as base64 strings, which is why the
//! default request body limit is 10 MiB.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod models;
mod routes;
mod services;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "beyond_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p beyond-cli -- migrate

    let max_body_bytes = config.max_body_bytes;
    let state = AppState::new(config, pool);

    // The original frontend is served from another origin and sends no
    // credentials, so CORS stays wide open.
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr = state.config().socket_addr();
    tracing::info!("beyond-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app).await.expect("Server failed");
}

/// Liveness check: the process is up.
async fn health() -> &'static str {
    "OK"
}

/// Readiness check: the database answers a round-trip.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
