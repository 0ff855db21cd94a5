mod common;

use common::*;
use database::error::DataError;
use database::services::course::{CourseService, NewCourse, UpdateCourse};
use database::services::instructor::InstructorService;
use database::services::review::ReviewService;
use database::services::student::StudentService;
use uuid::Uuid;

#[tokio::test]
async fn course_creation_requires_an_existing_instructor() {
    let db = setup().await;

    let err = CourseService::create(
        &db,
        NewCourse {
            title: "Rust 101".to_owned(),
            description: None,
            instructor_id: Uuid::new_v4(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DataError::NotFound {
            entity: "Instructor",
            ..
        }
    ));
}

#[tokio::test]
async fn duplicate_probe_is_case_insensitive_and_per_instructor() {
    let db = setup().await;
    let john = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let jane = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;
    seed_course(&db, john.id, "Rust 101").await;

    assert!(
        CourseService::exists_by_title_and_instructor(&db, "Rust 101", john.id)
            .await
            .unwrap()
    );
    assert!(
        CourseService::exists_by_title_and_instructor(&db, "RUST 101", john.id)
            .await
            .unwrap()
    );
    assert!(
        !CourseService::exists_by_title_and_instructor(&db, "Rust 101", jane.id)
            .await
            .unwrap()
    );

    // The store itself never blocks the duplicate pair.
    seed_course(&db, john.id, "Rust 101").await;
    assert_eq!(
        CourseService::count_by_instructor(&db, john.id).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn paginated_listing_searches_case_insensitively() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    seed_course(&db, instructor.id, "Advanced Rust").await;
    seed_course(&db, instructor.id, "Intro to Databases").await;

    let (matches, total) =
        CourseService::list_paginated(&db, 1, 20, Some("rust".to_owned()), None)
            .await
            .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].title, "Advanced Rust");

    let (matches, total) =
        CourseService::list_paginated(&db, 1, 20, Some("INTRO".to_owned()), None)
            .await
            .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].title, "Intro to Databases");

    // Page through the full set one row at a time.
    let (page_one, total) = CourseService::list_paginated(&db, 1, 1, None, None)
        .await
        .unwrap();
    let (page_two, _) = CourseService::list_paginated(&db, 2, 1, None, None)
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(page_one.len(), 1);
    assert_eq!(page_two.len(), 1);
    assert_ne!(page_one[0].id, page_two[0].id);
}

#[tokio::test]
async fn listing_filters_by_instructor_name() {
    let db = setup().await;
    let john = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let jane = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;
    let johns = seed_course(&db, john.id, "Rust 101").await;
    seed_course(&db, jane.id, "SQL 201").await;

    let (matches, total) =
        CourseService::list_paginated(&db, 1, 20, None, Some("n D".to_owned()))
            .await
            .unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].id, johns.id);

    let by_name = CourseService::find_by_instructor_name(&db, "doe").await.unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, johns.id);

    let none = CourseService::find_by_instructor_name(&db, "nobody").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn course_detail_is_a_fully_populated_aggregate() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;
    StudentService::enroll(&db, student.id, course.id).await.unwrap();
    seed_review(&db, course.id, "first", 4).await;
    tick().await;
    let newest = seed_review(&db, course.id, "second", 5).await;

    let (model, taught_by, reviews) = CourseService::get_detail(&db, course.id).await.unwrap();
    assert_eq!(model.id, course.id);
    assert_eq!(taught_by.map(|t| t.id), Some(instructor.id));
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].id, newest.id);

    let (student_model, courses) = StudentService::get_with_courses(&db, student.id)
        .await
        .unwrap();
    assert_eq!(student_model.id, student.id);
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].0.id, course.id);
    assert_eq!(
        courses[0].1.as_ref().map(|i| i.full_name()),
        Some("John Doe".to_owned())
    );
}

#[tokio::test]
async fn deleting_a_course_spares_students_and_instructor() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;
    StudentService::enroll(&db, student.id, course.id).await.unwrap();
    seed_review(&db, course.id, "gone soon", 2).await;

    CourseService::delete(&db, course.id).await.unwrap();

    let err = CourseService::get(&db, course.id).await.unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));

    // Join rows and reviews are gone; the people remain.
    assert!(!StudentService::is_enrolled(&db, student.id, course.id)
        .await
        .unwrap());
    assert_eq!(
        ReviewService::count_by_course(&db, course.id).await.unwrap(),
        0
    );
    StudentService::get(&db, student.id).await.unwrap();
    InstructorService::get(&db, instructor.id).await.unwrap();
}

#[tokio::test]
async fn update_can_repoint_the_instructor_only_to_a_real_one() {
    let db = setup().await;
    let john = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let jane = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;
    let course = seed_course(&db, john.id, "Rust 101").await;

    let err = CourseService::update(
        &db,
        course.id,
        UpdateCourse {
            instructor_id: Some(Uuid::new_v4()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));

    let updated = CourseService::update(
        &db,
        course.id,
        UpdateCourse {
            instructor_id: Some(jane.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.instructor_id, Some(jane.id));
}
