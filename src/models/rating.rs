use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::session::SessionMode;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingRecord {
    pub id: Uuid,
    pub session_id: Uuid,
    pub supporter_id: Uuid,
    pub rating: u8,
    pub review: Option<String>,
    pub mode: SessionMode,
    pub date: DateTime<Utc>,
}

pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingSummary {
    pub supporter_id: Uuid,
    pub average_rating: Option<f64>,
    pub total_ratings: usize,
    /// Count of 1..=5 star ratings, index 0 holding one-star ratings.
    #[schema(value_type = Vec<usize>)]
    pub distribution: [usize; 5],
}
