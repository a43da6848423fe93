use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::rating_dto::{RatingListResponse, RatingResponse};
use crate::error::Result;
use crate::utils::extract::ApiPath;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/ratings",
    responses(
        (status = 200, description = "Ratings in submission order", body = RatingListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_ratings(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items: Vec<RatingResponse> = state
        .rating_service
        .list()
        .await?
        .into_iter()
        .map(RatingResponse::from)
        .collect();
    let total = items.len();
    Ok(Json(RatingListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/supporters/{id}/ratings/summary",
    params(
        ("id" = Uuid, Path, description = "Supporter ID")
    ),
    responses(
        (status = 200, description = "Average, count and star distribution", body = crate::models::rating::RatingSummary)
    )
)]
#[axum::debug_handler]
pub async fn supporter_summary(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let summary = state.rating_service.summary_for(id).await?;
    Ok(Json(summary))
}
