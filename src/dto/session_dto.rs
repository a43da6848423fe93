use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::request::MeetingLocation;
use crate::models::session::{GeoPoint, Session, SessionMode, SessionStatus};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub request_id: Uuid,
    pub supporter_id: Uuid,
    pub mode: SessionMode,
    pub status: SessionStatus,
    pub status_message: String,
    pub eta_minutes: u32,
    pub supporter_location: GeoPoint,
    pub user_location: GeoPoint,
    pub meeting_location: MeetingLocation,
    pub started_at: DateTime<Utc>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let status_message = match (session.status, session.mode) {
            (SessionStatus::OnWay, SessionMode::Requestor) => "Supporter is on the way",
            (SessionStatus::OnWay, SessionMode::Supporter) => "Navigate to requestor",
            (SessionStatus::Arrived, SessionMode::Requestor) => "Supporter has arrived!",
            (SessionStatus::Arrived, SessionMode::Supporter) => "You have arrived",
            (SessionStatus::Completed, _) => "Session completed",
        }
        .to_string();
        Self {
            id: session.id,
            request_id: session.request_id,
            supporter_id: session.supporter_id,
            mode: session.mode,
            status: session.status,
            status_message,
            eta_minutes: session.eta_minutes,
            supporter_location: session.supporter_location,
            user_location: session.user_location,
            meeting_location: session.meeting_location,
            started_at: session.started_at,
            arrived_at: session.arrived_at,
            completed_at: session.completed_at,
        }
    }
}
