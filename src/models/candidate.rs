use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A supporter offered for one request. Lives only as long as the
/// request's candidate view and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Candidate {
    /// The supporter's id; a supporter appears at most once per request.
    pub id: Uuid,
    pub request_id: Uuid,
    pub supporter_name: String,
    pub age: u8,
    pub distance_km: f32,
    pub rating: f32,
    pub completed_sessions: u32,
    pub match_percentage: u8,
    pub bio: String,
    pub interests: Vec<String>,
    pub verified: bool,
    pub responded_at: DateTime<Utc>,
}
