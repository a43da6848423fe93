pub mod auth;
pub mod candidates;
pub mod docs;
pub mod health;
pub mod profile;
pub mod ratings;
pub mod requests;
pub mod sessions;
pub mod support;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};

use crate::middleware::{
    auth::require_bearer_auth,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

/// All routes. Everything under `/api` except login needs a bearer token.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let auth_api = Router::new()
        .route("/api/auth/otp", post(auth::send_otp))
        .route("/api/auth/verify", post(auth::verify_otp))
        .layer(from_fn_with_state(
            RateLimiter::new(config.public_rps),
            rps_middleware,
        ));

    let api = Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile).post(profile::register),
        )
        .route("/api/profile/stats", get(profile::stats))
        .route(
            "/api/requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/api/requests/:id", get(requests::get_request))
        .route(
            "/api/requests/:id/status",
            axum::routing::patch(requests::update_status),
        )
        .route(
            "/api/requests/:id/candidates",
            get(candidates::list_candidates),
        )
        .route(
            "/api/requests/:id/candidates/:candidate_id/decline",
            post(candidates::decline_candidate),
        )
        .route(
            "/api/requests/:id/candidates/:candidate_id/confirm",
            post(candidates::confirm_candidate),
        )
        .route("/api/support/requests", get(support::list_open_requests))
        .route(
            "/api/support/requests/:id/accept",
            post(support::accept_request),
        )
        .route("/api/sessions/:id", get(sessions::get_session))
        .route(
            "/api/sessions/:id/complete",
            post(sessions::complete_session),
        )
        .route(
            "/api/sessions/:id/tracking",
            delete(sessions::stop_tracking),
        )
        .route("/api/sessions/:id/rating", post(sessions::submit_rating))
        .route("/api/ratings", get(ratings::list_ratings))
        .route(
            "/api/supporters/:id/ratings/summary",
            get(ratings::supporter_summary),
        )
        .layer(from_fn_with_state(state.clone(), require_bearer_auth))
        .layer(from_fn_with_state(
            RateLimiter::new(config.api_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(auth_api)
        .merge(api)
        .with_state(state)
}
