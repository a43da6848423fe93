use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};

use crate::dto::profile_dto::{ProfileResponse, RegisterPayload};
use crate::error::Result;
use crate::utils::extract::ApiJson;
use crate::utils::token::Claims;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Profile registered", body = ProfileResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> Result<impl IntoResponse> {
    if payload.mobile != claims.sub {
        tracing::warn!("Profile mobile differs from the logged-in number");
    }
    let profile = state.profile_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Registered profile", body = ProfileResponse),
        (status = 404, description = "No profile registered yet")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let profile = state.profile_service.get().await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[utoipa::path(
    get,
    path = "/api/profile/stats",
    responses(
        (status = 200, description = "Home screen statistics", body = crate::models::user::ProfileStats)
    )
)]
#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.profile_service.stats().await?;
    Ok(Json(stats))
}
