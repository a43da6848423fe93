use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::rating::{rating_label, RatingRecord};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitRatingPayload {
    #[serde(default)]
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub review: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    #[serde(flatten)]
    pub record: RatingRecord,
    pub label: String,
}

impl From<RatingRecord> for RatingResponse {
    fn from(record: RatingRecord) -> Self {
        let label = rating_label(record.rating).to_string();
        Self { record, label }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingListResponse {
    pub items: Vec<RatingResponse>,
    pub total: usize,
}
