use crate::dtos::course::CourseResponse;
use crate::dtos::instructor::{
    CreateInstructorRequest, InstructorDetailsPayload, InstructorDetailsResponse,
    InstructorQueryParams, InstructorResponse, UpdateInstructorRequest,
};
use crate::dtos::review::ReviewResponse;
use crate::dtos::student::StudentResponse;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_create_instructor, validate_update_instructor};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::course::CourseService;
use database::services::instructor::{
    InstructorService, NewInstructor, NewInstructorDetail, UpdateInstructor,
};
use database::services::review::ReviewService;
use database::services::student::StudentService;
use sea_orm::prelude::Uuid;

/// List instructors, optionally filtered by name
#[utoipa::path(
    get,
    path = "/instructors",
    params(InstructorQueryParams),
    responses(
        (status = 200, description = "List of instructors", body = Vec<InstructorResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Instructors"
)]
pub async fn list_instructors(
    State(state): State<AppState>,
    Query(params): Query<InstructorQueryParams>,
) -> Result<Json<Vec<InstructorResponse>>, ApiError> {
    let instructors = InstructorService::list(&state.db, params.search.as_deref()).await?;
    Ok(Json(instructors.into_iter().map(Into::into).collect()))
}

/// Create an instructor, optionally with nested details
#[utoipa::path(
    post,
    path = "/instructors",
    request_body = CreateInstructorRequest,
    responses(
        (status = 201, description = "Instructor created", body = InstructorResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Instructors"
)]
pub async fn create_instructor(
    State(state): State<AppState>,
    Json(req): Json<CreateInstructorRequest>,
) -> Result<(StatusCode, Json<InstructorResponse>), ApiError> {
    validate_create_instructor(&req)?;

    let new = NewInstructor {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        details: req.details.map(|d| NewInstructorDetail {
            youtube_channel: d.youtube_channel,
            hobby: d.hobby,
        }),
    };
    let (model, details) = InstructorService::create(&state.db, new).await?;

    Ok((
        StatusCode::CREATED,
        Json(InstructorResponse::with_details(model, details)),
    ))
}

/// Get an instructor with its details and course count
#[utoipa::path(
    get,
    path = "/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor found", body = InstructorResponse),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors"
)]
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructorResponse>, ApiError> {
    let (model, details) = InstructorService::get_with_details(&state.db, id).await?;
    let course_count = CourseService::count_by_instructor(&state.db, id).await?;

    let mut response = InstructorResponse::with_details(model, details);
    response.course_count = Some(course_count);
    Ok(Json(response))
}

/// Update an instructor
#[utoipa::path(
    put,
    path = "/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = UpdateInstructorRequest,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorResponse),
        (status = 404, description = "Instructor not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Instructors"
)]
pub async fn update_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInstructorRequest>,
) -> Result<Json<InstructorResponse>, ApiError> {
    validate_update_instructor(&req)?;

    let update = UpdateInstructor {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };
    let model = InstructorService::update(&state.db, id, update).await?;
    Ok(Json(model.into()))
}

/// Delete an instructor; its details go with it, its courses are orphaned
#[utoipa::path(
    delete,
    path = "/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 204, description = "Instructor deleted"),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors"
)]
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    InstructorService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Attach an existing details row to an instructor
#[utoipa::path(
    put,
    path = "/instructors/{id}/details/{details_id}",
    params(
        ("id" = Uuid, Path, description = "Instructor ID"),
        ("details_id" = Uuid, Path, description = "Instructor details ID")
    ),
    responses(
        (status = 200, description = "Details attached", body = InstructorResponse),
        (status = 404, description = "Instructor or details not found"),
        (status = 409, description = "Either side is already linked")
    ),
    tag = "Instructors"
)]
pub async fn attach_instructor_details(
    State(state): State<AppState>,
    Path((id, details_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<InstructorResponse>, ApiError> {
    let (model, details) = InstructorService::attach_details(&state.db, id, details_id).await?;
    Ok(Json(InstructorResponse::with_details(model, Some(details))))
}

/// Detach an instructor's details, leaving the row orphaned
#[utoipa::path(
    delete,
    path = "/instructors/{id}/details",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Details detached", body = InstructorResponse),
        (status = 404, description = "Instructor not found"),
        (status = 409, description = "No details attached")
    ),
    tag = "Instructors"
)]
pub async fn detach_instructor_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructorResponse>, ApiError> {
    let model = InstructorService::detach_details(&state.db, id).await?;
    Ok(Json(model.into()))
}

/// Courses taught by an instructor
#[utoipa::path(
    get,
    path = "/instructors/{id}/courses",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Courses taught by the instructor", body = Vec<CourseResponse>),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors"
)]
pub async fn get_instructor_courses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::find_by_instructor(&state.db, id).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Students enrolled in any of an instructor's courses
#[utoipa::path(
    get,
    path = "/instructors/{id}/students",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Students of the instructor, de-duplicated", body = Vec<StudentResponse>),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors"
)]
pub async fn get_instructor_students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentService::find_by_instructor(&state.db, id).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Reviews across all of an instructor's courses, newest first
#[utoipa::path(
    get,
    path = "/instructors/{id}/reviews",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Reviews for the instructor's courses", body = Vec<ReviewResponse>),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors"
)]
pub async fn get_instructor_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = ReviewService::find_by_instructor(&state.db, id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Create a standalone (not yet attached) details row
#[utoipa::path(
    post,
    path = "/instructor-details",
    request_body = InstructorDetailsPayload,
    responses(
        (status = 201, description = "Details created", body = InstructorDetailsResponse)
    ),
    tag = "Instructors"
)]
pub async fn create_instructor_details(
    State(state): State<AppState>,
    Json(req): Json<InstructorDetailsPayload>,
) -> Result<(StatusCode, Json<InstructorDetailsResponse>), ApiError> {
    let details = InstructorService::create_details(
        &state.db,
        NewInstructorDetail {
            youtube_channel: req.youtube_channel,
            hobby: req.hobby,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(details.into())))
}

/// Get a details row by id
#[utoipa::path(
    get,
    path = "/instructor-details/{id}",
    params(("id" = Uuid, Path, description = "Instructor details ID")),
    responses(
        (status = 200, description = "Details found", body = InstructorDetailsResponse),
        (status = 404, description = "Details not found")
    ),
    tag = "Instructors"
)]
pub async fn get_instructor_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructorDetailsResponse>, ApiError> {
    let details = InstructorService::get_details(&state.db, id).await?;
    Ok(Json(details.into()))
}

/// Delete an orphaned details row
#[utoipa::path(
    delete,
    path = "/instructor-details/{id}",
    params(("id" = Uuid, Path, description = "Instructor details ID")),
    responses(
        (status = 204, description = "Details deleted"),
        (status = 404, description = "Details not found"),
        (status = 409, description = "Details still linked to an instructor")
    ),
    tag = "Instructors"
)]
pub async fn delete_instructor_details(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    InstructorService::delete_details(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
