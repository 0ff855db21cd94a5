use chrono::NaiveDateTime;
use database::entities::review;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub comment: String,
    /// 1 through 5
    pub rating: i16,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct LatestReviewsParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    10
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: String,
    pub course_id: String,
    pub comment: String,
    pub rating: i16,
    pub created_at: NaiveDateTime,
}

impl From<review::Model> for ReviewResponse {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id.to_string(),
            course_id: model.course_id.to_string(),
            comment: model.comment,
            rating: model.rating,
            created_at: model.created_at,
        }
    }
}
