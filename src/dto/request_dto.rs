use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::request::{Category, Language, RequestStatus, SupportRequest};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationChoice {
    #[default]
    Home,
    Public,
    Online,
    Custom,
}

/// Form body for a new request. Required fields are optional here so a
/// half-filled form reports every missing field at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateRequestPayload {
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub time_from: Option<NaiveTime>,
    pub time_to: Option<NaiveTime>,
    pub language: Option<Language>,
    pub location: LocationChoice,
    #[validate(length(max = 300))]
    pub custom_location: Option<String>,
    #[validate(length(max = 2000))]
    pub details: Option<String>,
    pub reward: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusPayload {
    pub status: RequestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestListResponse {
    pub items: Vec<SupportRequest>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenRequestQuery {
    pub category: Option<Category>,
}

/// Supporter-side acceptance. Without an explicit id the registered
/// profile acts as the supporter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AcceptRequestPayload {
    pub supporter_id: Option<uuid::Uuid>,
}
