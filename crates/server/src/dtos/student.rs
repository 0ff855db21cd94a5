use chrono::NaiveDateTime;
use database::entities::{course, instructor, student};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct StudentQueryParams {
    /// Matches first name, last name, or the full "first last" form
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseStudentsQueryParams {
    /// When false, returns the students NOT enrolled in the course
    #[serde(default = "default_enrolled")]
    pub enrolled: bool,
}

fn default_enrolled() -> bool {
    true
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<EnrolledCourseResponse>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledCourseResponse {
    pub id: String,
    pub title: String,
    pub instructor_name: Option<String>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        let full_name = model.full_name();
        Self {
            id: model.id.to_string(),
            first_name: model.first_name,
            last_name: model.last_name,
            full_name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
            courses: None,
        }
    }
}

impl StudentResponse {
    pub fn with_courses(
        model: student::Model,
        courses: Vec<(course::Model, Option<instructor::Model>)>,
    ) -> Self {
        let mut response = Self::from(model);
        response.courses = Some(
            courses
                .into_iter()
                .map(|(course, instructor)| EnrolledCourseResponse {
                    id: course.id.to_string(),
                    title: course.title,
                    instructor_name: instructor.map(|i| i.full_name()),
                })
                .collect(),
        );
        response
    }
}
