use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendOtpPayload {
    #[validate(length(equal = 10, message = "Please enter a valid 10-digit mobile number"))]
    pub mobile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    pub sent: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpPayload {
    #[validate(length(equal = 10, message = "Please enter a valid 10-digit mobile number"))]
    pub mobile: String,
    #[validate(length(min = 1, message = "OTP is required"))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}
