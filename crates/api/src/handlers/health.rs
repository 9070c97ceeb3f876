//! Liveness endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /health
///
/// Reports process liveness and database reachability.
pub async fn health(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let database = match vitrine_db::health_check(&state.pool).await {
        Ok(()) => "ok",
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            "unreachable"
        }
    };

    Ok(Json(DataResponse {
        data: HealthStatus {
            status: "ok",
            database,
        },
    }))
}
