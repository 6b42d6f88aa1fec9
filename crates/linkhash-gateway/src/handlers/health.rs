use axum::Json;

use crate::model::HealthResponse;

/// Liveness probe. Does not touch storage.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
