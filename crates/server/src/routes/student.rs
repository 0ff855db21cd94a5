use crate::dtos::student::{
    CourseStudentsQueryParams, CreateStudentRequest, StudentQueryParams, StudentResponse,
    UpdateStudentRequest,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_create_student, validate_update_student};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::student::{NewStudent, StudentService, UpdateStudent};
use sea_orm::prelude::Uuid;

/// List students, optionally filtered by name
#[utoipa::path(
    get,
    path = "/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "List of students", body = Vec<StudentResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = StudentService::list(&state.db, params.search.as_deref()).await?;
    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    validate_create_student(&req)?;

    let model = StudentService::create(
        &state.db,
        NewStudent {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// Get a student with its enrolled courses
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let (model, courses) = StudentService::get_with_courses(&state.db, id).await?;
    Ok(Json(StudentResponse::with_courses(model, courses)))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, ApiError> {
    validate_update_student(&req)?;

    let model = StudentService::update(
        &state.db,
        id,
        UpdateStudent {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
        },
    )
    .await?;
    Ok(Json(model.into()))
}

/// Delete a student and its enrollments
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    StudentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Enroll a student in a course
#[utoipa::path(
    put,
    path = "/students/{id}/courses/{course_id}",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Student enrolled"),
        (status = 404, description = "Student or course not found"),
        (status = 409, description = "Already enrolled")
    ),
    tag = "Students"
)]
pub async fn enroll_student(
    State(state): State<AppState>,
    Path((id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    StudentService::enroll(&state.db, id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a student from a course
#[utoipa::path(
    delete,
    path = "/students/{id}/courses/{course_id}",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Student unenrolled"),
        (status = 404, description = "Student or course not found"),
        (status = 409, description = "Not enrolled")
    ),
    tag = "Students"
)]
pub async fn unenroll_student(
    State(state): State<AppState>,
    Path((id, course_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    StudentService::unenroll(&state.db, id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Students enrolled in (or, with ?enrolled=false, missing from) a course
#[utoipa::path(
    get,
    path = "/courses/{id}/students",
    params(
        ("id" = Uuid, Path, description = "Course ID"),
        CourseStudentsQueryParams
    ),
    responses(
        (status = 200, description = "Matching students", body = Vec<StudentResponse>),
        (status = 404, description = "Course not found")
    ),
    tag = "Students"
)]
pub async fn get_course_students(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<CourseStudentsQueryParams>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = if params.enrolled {
        StudentService::find_enrolled_in_course(&state.db, id).await?
    } else {
        StudentService::find_not_enrolled_in_course(&state.db, id).await?
    };
    Ok(Json(students.into_iter().map(Into::into).collect()))
}
