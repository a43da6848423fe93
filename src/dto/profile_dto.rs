use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::request::Language;
use crate::models::user::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<u8>,
    pub gender: Option<String>,
    #[validate(length(equal = 10, message = "Please enter a valid 10-digit mobile number"))]
    pub mobile: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(equal = 12, message = "Aadhaar number must have 12 digits"))]
    pub aadhaar: Option<String>,
    pub language: Option<Language>,
    #[validate(length(max = 1000))]
    pub interests: Option<String>,
    #[validate(length(max = 4000))]
    pub mental_health_assessment: Option<String>,
    #[serde(default)]
    pub agreed_to_terms: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u8>,
    pub gender: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    pub aadhaar_masked: Option<String>,
    pub language: Option<Language>,
    pub interests: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        let aadhaar_masked = profile.aadhaar.as_deref().map(mask_aadhaar);
        Self {
            id: profile.id,
            name: profile.name,
            age: profile.age,
            gender: profile.gender,
            mobile: profile.mobile,
            address: profile.address,
            aadhaar_masked,
            language: profile.language,
            interests: profile.interests,
            registered_at: profile.registered_at,
        }
    }
}

fn mask_aadhaar(raw: &str) -> String {
    let tail: String = raw
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("XXXX-XXXX-{}", tail)
}
