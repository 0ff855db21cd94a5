use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use database::error::DataError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("validation failed")]
    Validation(Vec<FieldError>),
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
}

/// The JSON body every error response carries.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Data(DataError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Data(DataError::AlreadyExists { .. }) => {
                (StatusCode::CONFLICT, "already_exists")
            }
            ApiError::Data(DataError::IllegalState(_)) => (StatusCode::CONFLICT, "illegal_state"),
            ApiError::Data(DataError::Integrity(_)) => {
                (StatusCode::CONFLICT, "integrity_violation")
            }
            ApiError::Data(DataError::Db(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {self}");
        }

        let message = match &self {
            ApiError::Validation(errors) => {
                format!("validation failed for {} field(s)", errors.len())
            }
            other => other.to_string(),
        };
        let field_errors = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: kind.to_owned(),
            message,
            path: None,
            field_errors,
        };

        // The body is also stashed in the response extensions so the
        // attach_error_context middleware can add the request path.
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Middleware that rewrites error bodies with the request path.
pub async fn attach_error_context(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;

    if let Some(body) = response.extensions_mut().remove::<ErrorBody>() {
        let status = response.status();
        let body = ErrorBody {
            path: Some(path),
            ..body
        };
        return (status, Json(body)).into_response();
    }

    response
}
