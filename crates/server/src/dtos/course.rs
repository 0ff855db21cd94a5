use crate::dtos::review::ReviewResponse;
use chrono::NaiveDateTime;
use database::entities::{course, instructor, review};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    /// Opt out of the duplicate (title, instructor) probe
    #[serde(default)]
    pub allow_duplicate_title: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Case-insensitive substring match on title or description
    pub search: Option<String>,

    /// Instructor name filter (composite full-name match)
    pub instructor: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub courses: Vec<CourseResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<course::Model> for CourseResponse {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title,
            description: model.description,
            instructor_id: model.instructor_id.map(|id| id.to_string()),
            created_at: model.created_at,
            updated_at: model.updated_at,
            instructor_name: None,
            reviews: None,
            student_count: None,
        }
    }
}

impl CourseResponse {
    pub fn detail(
        model: course::Model,
        instructor: Option<instructor::Model>,
        reviews: Vec<review::Model>,
        student_count: u64,
    ) -> Self {
        let mut response = Self::from(model);
        response.instructor_name = instructor.map(|i| i.full_name());
        response.reviews = Some(reviews.into_iter().map(Into::into).collect());
        response.student_count = Some(student_count);
        response
    }
}
