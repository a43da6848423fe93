use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::{auth_dto, candidate_dto, profile_dto, rating_dto, request_dto, session_dto};
use crate::models::{candidate, rating, request, session, user};
use crate::routes::{auth, candidates, health, profile, ratings, requests, sessions, support};

#[derive(OpenApi)]
#[openapi(
    info(title = "Companion backend", description = "Support request lifecycle API"),
    paths(
        health::health,
        auth::send_otp,
        auth::verify_otp,
        profile::register,
        profile::get_profile,
        profile::stats,
        requests::create_request,
        requests::list_requests,
        requests::get_request,
        requests::update_status,
        candidates::list_candidates,
        candidates::decline_candidate,
        candidates::confirm_candidate,
        support::list_open_requests,
        support::accept_request,
        sessions::get_session,
        sessions::complete_session,
        sessions::stop_tracking,
        sessions::submit_rating,
        ratings::list_ratings,
        ratings::supporter_summary,
    ),
    components(schemas(
        auth_dto::SendOtpPayload,
        auth_dto::SendOtpResponse,
        auth_dto::VerifyOtpPayload,
        auth_dto::TokenResponse,
        profile_dto::RegisterPayload,
        profile_dto::ProfileResponse,
        request_dto::LocationChoice,
        request_dto::CreateRequestPayload,
        request_dto::UpdateStatusPayload,
        request_dto::RequestListResponse,
        request_dto::AcceptRequestPayload,
        candidate_dto::CandidateListResponse,
        candidate_dto::ConfirmCandidateResponse,
        session_dto::SessionResponse,
        rating_dto::SubmitRatingPayload,
        rating_dto::RatingResponse,
        rating_dto::RatingListResponse,
        request::Category,
        request::Language,
        request::MeetingLocation,
        request::TimeWindow,
        request::RequestStatus,
        request::SupportRequest,
        candidate::Candidate,
        session::SessionMode,
        session::SessionStatus,
        session::GeoPoint,
        session::SessionResult,
        rating::RatingRecord,
        rating::RatingSummary,
        user::ProfileStats,
    ))
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
