use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::storage::USER_KEY;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and storage are up"),
        (status = 503, description = "Storage backend unreachable")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.get(USER_KEY).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "storage": "ok",
            })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "storage": "unavailable",
                })),
            )
        }
    }
}
