use crate::dtos::review::{CreateReviewRequest, LatestReviewsParams, ReviewResponse};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::validate_create_review;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::review::{NewReview, ReviewService};
use sea_orm::prelude::Uuid;

/// Reviews for a course, newest first
#[utoipa::path(
    get,
    path = "/courses/{id}/reviews",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Reviews for the course", body = Vec<ReviewResponse>),
        (status = 404, description = "Course not found")
    ),
    tag = "Reviews"
)]
pub async fn get_course_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = ReviewService::find_by_course(&state.db, id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Create a review on an existing course
#[utoipa::path(
    post,
    path = "/courses/{id}/reviews",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Course not found")
    ),
    tag = "Reviews"
)]
pub async fn create_course_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    validate_create_review(&req)?;

    let model = ReviewService::create(
        &state.db,
        NewReview {
            course_id: id,
            comment: req.comment,
            rating: req.rating,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// The most recent reviews across all courses
#[utoipa::path(
    get,
    path = "/reviews/latest",
    params(LatestReviewsParams),
    responses(
        (status = 200, description = "Latest reviews, newest first", body = Vec<ReviewResponse>)
    ),
    tag = "Reviews"
)]
pub async fn get_latest_reviews(
    State(state): State<AppState>,
    Query(params): Query<LatestReviewsParams>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = ReviewService::find_latest(&state.db, params.limit).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Get a review by id
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ReviewResponse),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews"
)]
pub async fn get_review_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let model = ReviewService::get(&state.db, id).await?;
    Ok(Json(model.into()))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    ReviewService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
