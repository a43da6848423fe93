use axum::{extract::State, response::IntoResponse, Json};

use crate::dto::auth_dto::{SendOtpPayload, VerifyOtpPayload};
use crate::error::Result;
use crate::utils::extract::ApiJson;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/auth/otp",
    request_body = SendOtpPayload,
    responses(
        (status = 200, description = "Verification code sent", body = crate::dto::auth_dto::SendOtpResponse),
        (status = 400, description = "Invalid mobile number")
    )
)]
#[axum::debug_handler]
pub async fn send_otp(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SendOtpPayload>,
) -> Result<impl IntoResponse> {
    let sent = state.auth_service.send_otp(payload).await?;
    Ok(Json(sent))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify",
    request_body = VerifyOtpPayload,
    responses(
        (status = 200, description = "Bearer token issued", body = crate::dto::auth_dto::TokenResponse),
        (status = 400, description = "No pending code for this number"),
        (status = 401, description = "Invalid OTP")
    )
)]
#[axum::debug_handler]
pub async fn verify_otp(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<VerifyOtpPayload>,
) -> Result<impl IntoResponse> {
    let token = state.auth_service.verify_otp(payload).await?;
    Ok(Json(token))
}
