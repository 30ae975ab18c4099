//! # gatehouse_api
//!
//! HTTP API library for Gatehouse: thin request/response glue over the
//! session bridge. The remember-me lifecycle itself lives in
//! `gatehouse_core`.

pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod models;
pub mod providers;

use axum::Router;
use axum::routing::{get, post};
use gatehouse_core::auth::session::SessionBridge;
use gatehouse_core::db::Store;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{health, sessions};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store handle, used directly only for health checks.
    pub store: Store,
    /// Session bridge over the token ledger.
    pub bridge: SessionBridge,
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/auth/sessions", post(sessions::create_session_handler))
        .route(
            "/auth/sessions/current",
            get(sessions::current_session_handler).delete(sessions::logout_handler),
        )
        .layer(cors)
        .with_state(state)
}
