//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::error::AppResult;
use crate::models::HealthResponse;

/// `GET /api/health` — liveness plus store connectivity.
///
/// An unreachable store reports `dbConnected: false` with a 200: the
/// gateway keeps serving logins with persistence degraded.
pub async fn health_handler(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let db_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "database ping failed");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        db_connected,
        version: gatehouse_core::version().to_string(),
    }))
}
