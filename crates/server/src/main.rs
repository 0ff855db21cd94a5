mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;
mod validation;

use crate::doc::ApiDoc;
use crate::state::AppState;
use crate::utils::shutdown::shutdown_signal;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let db = database::db::create_connection()
        .await
        .expect("failed to connect to database");
    let state = AppState { db };

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let app = Router::new()
        .route("/", get(routes::root::root))
        .route("/health", get(routes::health::health))
        .route(
            "/instructors",
            get(routes::instructor::list_instructors).post(routes::instructor::create_instructor),
        )
        .route(
            "/instructors/{id}",
            get(routes::instructor::get_instructor)
                .put(routes::instructor::update_instructor)
                .delete(routes::instructor::delete_instructor),
        )
        .route(
            "/instructors/{id}/details/{details_id}",
            put(routes::instructor::attach_instructor_details),
        )
        .route(
            "/instructors/{id}/details",
            delete(routes::instructor::detach_instructor_details),
        )
        .route(
            "/instructors/{id}/courses",
            get(routes::instructor::get_instructor_courses),
        )
        .route(
            "/instructors/{id}/students",
            get(routes::instructor::get_instructor_students),
        )
        .route(
            "/instructors/{id}/reviews",
            get(routes::instructor::get_instructor_reviews),
        )
        .route(
            "/instructor-details",
            post(routes::instructor::create_instructor_details),
        )
        .route(
            "/instructor-details/{id}",
            get(routes::instructor::get_instructor_details)
                .delete(routes::instructor::delete_instructor_details),
        )
        .route(
            "/students",
            get(routes::student::list_students).post(routes::student::create_student),
        )
        .route(
            "/students/{id}",
            get(routes::student::get_student)
                .put(routes::student::update_student)
                .delete(routes::student::delete_student),
        )
        .route(
            "/students/{id}/courses/{course_id}",
            put(routes::student::enroll_student).delete(routes::student::unenroll_student),
        )
        .route(
            "/courses",
            get(routes::course::get_courses).post(routes::course::create_course),
        )
        .route(
            "/courses/{id}",
            get(routes::course::get_course_by_id)
                .put(routes::course::update_course)
                .delete(routes::course::delete_course),
        )
        .route(
            "/courses/{id}/students",
            get(routes::student::get_course_students),
        )
        .route(
            "/courses/{id}/reviews",
            get(routes::review::get_course_reviews).post(routes::review::create_course_review),
        )
        .route("/reviews/latest", get(routes::review::get_latest_reviews))
        .route(
            "/reviews/{id}",
            get(routes::review::get_review_by_id).delete(routes::review::delete_review),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(error::attach_error_context))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();
    info!("Running axum on http://{bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
