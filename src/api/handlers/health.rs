//! Health probe handler.

use axum::Json;
use axum::extract::State;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// `GET /health` — reports database reachability.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.db {
        Some(pool) => match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(pool.as_ref())
            .await
        {
            Ok(_) => "ok",
            Err(e) => {
                tracing::warn!("health probe failed: {e}");
                "unavailable"
            }
        },
        None => "in_memory",
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
