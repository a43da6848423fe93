use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::session_dto::SessionResponse;
use crate::models::candidate::Candidate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandidateListResponse {
    pub request_id: Uuid,
    pub items: Vec<Candidate>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfirmCandidateResponse {
    pub supporter_name: String,
    pub message: String,
    pub session: SessionResponse,
}
