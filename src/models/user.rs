use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::request::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub age: Option<u8>,
    pub gender: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhaar: Option<String>,
    pub language: Option<Language>,
    pub interests: Option<String>,
    pub mental_health_assessment: Option<String>,
    pub agreed_to_terms: bool,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileStats {
    pub requests_made: usize,
    pub sessions_completed: usize,
    pub ratings_given: usize,
    pub average_rating_given: Option<f64>,
}
