use chrono::NaiveDateTime;
use database::entities::{instructor, instructor_detail};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInstructorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub details: Option<InstructorDetailsPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InstructorDetailsPayload {
    pub youtube_channel: Option<String>,
    pub hobby: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateInstructorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct InstructorQueryParams {
    /// Matches first name, last name, or the full "first last" form
    pub search: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<InstructorDetailsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_count: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorDetailsResponse {
    pub id: String,
    pub youtube_channel: Option<String>,
    pub hobby: Option<String>,
}

impl From<instructor::Model> for InstructorResponse {
    fn from(model: instructor::Model) -> Self {
        let full_name = model.full_name();
        Self {
            id: model.id.to_string(),
            first_name: model.first_name,
            last_name: model.last_name,
            full_name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
            details: None,
            course_count: None,
        }
    }
}

impl InstructorResponse {
    pub fn with_details(
        model: instructor::Model,
        details: Option<instructor_detail::Model>,
    ) -> Self {
        let mut response = Self::from(model);
        response.details = details.map(Into::into);
        response
    }
}

impl From<instructor_detail::Model> for InstructorDetailsResponse {
    fn from(model: instructor_detail::Model) -> Self {
        Self {
            id: model.id.to_string(),
            youtube_channel: model.youtube_channel,
            hobby: model.hobby,
        }
    }
}
