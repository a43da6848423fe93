use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::request::MeetingLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Requestor,
    Supporter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    OnWay,
    Arrived,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Bengaluru city centre; every simulated session starts here.
    pub const ORIGIN: GeoPoint = GeoPoint {
        lat: 12.9716,
        lng: 77.5946,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub request_id: Uuid,
    pub supporter_id: Uuid,
    pub mode: SessionMode,
    pub status: SessionStatus,
    pub eta_minutes: u32,
    pub supporter_location: GeoPoint,
    pub user_location: GeoPoint,
    pub meeting_location: MeetingLocation,
    pub started_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// What a finished session hands to the rating step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionResult {
    pub session_id: Uuid,
    pub request_id: Uuid,
    pub supporter_id: Uuid,
    pub mode: SessionMode,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    EtaUpdated {
        session_id: Uuid,
        eta_minutes: u32,
        supporter_location: GeoPoint,
    },
    Arrived {
        session_id: Uuid,
    },
    Completed {
        session_id: Uuid,
    },
}
