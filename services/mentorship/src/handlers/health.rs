use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness: the process is serving requests.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness: the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
