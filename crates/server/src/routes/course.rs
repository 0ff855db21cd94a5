use crate::dtos::course::{
    CourseQueryParams, CourseResponse, CreateCourseRequest, PaginatedCoursesResponse,
    PaginationMeta, UpdateCourseRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_create_course, validate_update_course};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::error::DataError;
use database::services::course::{CourseService, NewCourse, UpdateCourse};
use database::services::student::StudentService;
use sea_orm::prelude::Uuid;

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<PaginatedCoursesResponse>, ApiError> {
    let per_page = params.per_page.max(1);
    let (courses, total_items) = CourseService::list_paginated(
        &state.db,
        params.page,
        per_page,
        params.search,
        params.instructor,
    )
    .await?;

    // Calculate pagination metadata
    let total_pages = total_items.div_ceil(per_page);
    let pagination = PaginationMeta {
        page: params.page,
        per_page,
        total_pages,
        total_items,
        has_next: params.page < total_pages,
        has_prev: params.page > 1,
    };

    Ok(Json(PaginatedCoursesResponse {
        courses: courses.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

/// Create a course for an existing instructor
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Instructor not found"),
        (status = 409, description = "Duplicate title for this instructor")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    validate_create_course(&req)?;

    // Duplicate prevention is caller policy; the store never blocks the pair.
    if !req.allow_duplicate_title
        && CourseService::exists_by_title_and_instructor(&state.db, &req.title, req.instructor_id)
            .await?
    {
        return Err(ApiError::Data(DataError::AlreadyExists {
            entity: "Course",
            field: "title",
            value: req.title,
        }));
    }

    let model = CourseService::create(
        &state.db,
        NewCourse {
            title: req.title,
            description: req.description,
            instructor_id: req.instructor_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// Get a specific course by ID, with instructor, reviews, and enrollment count
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    let (course, instructor, reviews) = CourseService::get_detail(&state.db, id).await?;
    let student_count = StudentService::count_in_course(&state.db, id).await?;

    Ok(Json(CourseResponse::detail(
        course,
        instructor,
        reviews,
        student_count,
    )))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course or instructor not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    validate_update_course(&req)?;

    let model = CourseService::update(
        &state.db,
        id,
        UpdateCourse {
            title: req.title,
            description: req.description,
            instructor_id: req.instructor_id,
        },
    )
    .await?;
    Ok(Json(model.into()))
}

/// Delete a course along with its reviews and enrollments
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    CourseService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
