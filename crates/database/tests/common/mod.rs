#![allow(dead_code)]

use database::entities::{course, instructor, review, student};
use database::services::course::{CourseService, NewCourse};
use database::services::instructor::{InstructorService, NewInstructor, NewInstructorDetail};
use database::services::review::{NewReview, ReviewService};
use database::services::student::{NewStudent, StudentService};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

/// Fresh in-memory database with the real migrations applied. A single
/// pooled connection keeps the in-memory store alive for the whole test.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn seed_instructor(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> instructor::Model {
    let (model, _) = InstructorService::create(
        db,
        NewInstructor {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            details: None,
        },
    )
    .await
    .expect("create instructor");
    model
}

pub async fn seed_instructor_with_details(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
    hobby: &str,
) -> (instructor::Model, database::entities::instructor_detail::Model) {
    let (model, details) = InstructorService::create(
        db,
        NewInstructor {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            details: Some(NewInstructorDetail {
                youtube_channel: None,
                hobby: Some(hobby.to_owned()),
            }),
        },
    )
    .await
    .expect("create instructor with details");
    (model, details.expect("details were requested"))
}

pub async fn seed_student(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> student::Model {
    StudentService::create(
        db,
        NewStudent {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
        },
    )
    .await
    .expect("create student")
}

pub async fn seed_course(
    db: &DatabaseConnection,
    instructor_id: Uuid,
    title: &str,
) -> course::Model {
    CourseService::create(
        db,
        NewCourse {
            title: title.to_owned(),
            description: None,
            instructor_id,
        },
    )
    .await
    .expect("create course")
}

pub async fn seed_review(
    db: &DatabaseConnection,
    course_id: Uuid,
    comment: &str,
    rating: i16,
) -> review::Model {
    ReviewService::create(
        db,
        NewReview {
            course_id,
            comment: comment.to_owned(),
            rating,
        },
    )
    .await
    .expect("create review")
}

/// Timestamp resolution is finite; space out writes whose ordering a
/// test asserts on.
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(15)).await;
}
