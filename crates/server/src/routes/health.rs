use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};
use database::error::DataError;

/// Returns "OK" when the service and its database are reachable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", content_type = "text/plain", body = String),
        (status = 500, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Result<(StatusCode, &'static str), ApiError> {
    state.db.ping().await.map_err(DataError::from)?;
    Ok((StatusCode::OK, "OK"))
}
