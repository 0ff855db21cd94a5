use axum::http::StatusCode;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", content_type = "text/plain", body = String)
    ),
    tag = ""
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "edu-admin backend")
}
