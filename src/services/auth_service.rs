use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use validator::Validate;

use crate::config::Config;
use crate::dto::auth_dto::{SendOtpPayload, SendOtpResponse, TokenResponse, VerifyOtpPayload};
use crate::error::{Error, Result};
use crate::utils::token::{issue_token, verify_token, Claims};
use crate::utils::{time, validation::ensure_mobile};

const OTP_VALIDITY_MINUTES: i64 = 10;

/// Demo login: any 10-digit number can request a code, and the code is
/// always the configured demo OTP.
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: Arc<str>,
    token_ttl_minutes: i64,
    demo_otp: Arc<str>,
    challenges: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            token_ttl_minutes: config.token_ttl_minutes,
            demo_otp: Arc::from(config.demo_otp.as_str()),
            challenges: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn send_otp(&self, payload: SendOtpPayload) -> Result<SendOtpResponse> {
        payload.validate()?;
        ensure_mobile(&payload.mobile)?;

        let now = time::now();
        let mut challenges = self.challenges.lock().await;
        challenges.retain(|_, expires_at| *expires_at > now);
        challenges.insert(
            payload.mobile.clone(),
            now + Duration::minutes(OTP_VALIDITY_MINUTES),
        );
        drop(challenges);

        tracing::info!(mobile_suffix = %&payload.mobile[6..], "OTP issued");
        Ok(SendOtpResponse {
            sent: true,
            message: format!("Verification code sent to +91 {}", payload.mobile),
        })
    }

    pub async fn verify_otp(&self, payload: VerifyOtpPayload) -> Result<TokenResponse> {
        payload.validate()?;
        ensure_mobile(&payload.mobile)?;

        let mut challenges = self.challenges.lock().await;
        let expires_at = challenges
            .get(&payload.mobile)
            .copied()
            .ok_or_else(|| Error::BadRequest("Request an OTP first".to_string()))?;
        if expires_at <= time::now() {
            challenges.remove(&payload.mobile);
            return Err(Error::BadRequest(
                "OTP has expired, request a new one".to_string(),
            ));
        }
        if payload.otp.trim() != &*self.demo_otp {
            tracing::warn!(mobile_suffix = %&payload.mobile[6..], "Invalid OTP");
            return Err(Error::Unauthorized("Invalid OTP".to_string()));
        }
        challenges.remove(&payload.mobile);
        drop(challenges);

        let token = issue_token(&payload.mobile, &self.jwt_secret, self.token_ttl_minutes)?;
        tracing::info!(mobile_suffix = %&payload.mobile[6..], "Login successful");
        Ok(TokenResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl_minutes * 60,
        })
    }

    pub fn authenticate(&self, bearer: &str) -> Result<Claims> {
        verify_token(bearer, &self.jwt_secret)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))
    }
}
