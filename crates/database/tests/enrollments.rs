mod common;

use common::*;
use database::error::DataError;
use database::services::student::StudentService;
use uuid::Uuid;

#[tokio::test]
async fn enrolling_twice_is_an_error_not_a_noop() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;

    StudentService::enroll(&db, student.id, course.id)
        .await
        .unwrap();
    assert!(StudentService::is_enrolled(&db, student.id, course.id)
        .await
        .unwrap());

    let err = StudentService::enroll(&db, student.id, course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::IllegalState(_)));

    assert_eq!(
        StudentService::count_in_course(&db, course.id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn unenrolling_when_not_enrolled_is_an_error() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;

    let err = StudentService::unenroll(&db, student.id, course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::IllegalState(_)));
}

#[tokio::test]
async fn enroll_then_unenroll_leaves_no_membership() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;

    StudentService::enroll(&db, student.id, course.id)
        .await
        .unwrap();
    StudentService::unenroll(&db, student.id, course.id)
        .await
        .unwrap();

    assert!(!StudentService::is_enrolled(&db, student.id, course.id)
        .await
        .unwrap());
    let enrolled = StudentService::find_enrolled_in_course(&db, course.id)
        .await
        .unwrap();
    assert!(enrolled.iter().all(|s| s.id != student.id));
}

#[tokio::test]
async fn not_enrolled_listing_is_the_complement() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let alice = seed_student(&db, "Alice", "Smith", "alice@example.com").await;
    let bob = seed_student(&db, "Bob", "Jones", "bob@example.com").await;

    StudentService::enroll(&db, alice.id, course.id).await.unwrap();

    let enrolled = StudentService::find_enrolled_in_course(&db, course.id)
        .await
        .unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, alice.id);

    let missing = StudentService::find_not_enrolled_in_course(&db, course.id)
        .await
        .unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].id, bob.id);
}

#[tokio::test]
async fn students_of_an_instructor_are_deduplicated() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let rust = seed_course(&db, instructor.id, "Rust 101").await;
    let sql = seed_course(&db, instructor.id, "SQL 201").await;
    let alice = seed_student(&db, "Alice", "Smith", "alice@example.com").await;
    seed_student(&db, "Bob", "Jones", "bob@example.com").await;

    StudentService::enroll(&db, alice.id, rust.id).await.unwrap();
    StudentService::enroll(&db, alice.id, sql.id).await.unwrap();

    let students = StudentService::find_by_instructor(&db, instructor.id)
        .await
        .unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, alice.id);
}

#[tokio::test]
async fn enrollment_checks_report_missing_entities() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let student = seed_student(&db, "Alice", "Smith", "alice@example.com").await;

    let err = StudentService::enroll(&db, student.id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::NotFound {
            entity: "Course",
            ..
        }
    ));

    let err = StudentService::enroll(&db, Uuid::new_v4(), course.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::NotFound {
            entity: "Student",
            ..
        }
    ));
}

#[tokio::test]
async fn deleting_a_student_removes_only_its_enrollments() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let alice = seed_student(&db, "Alice", "Smith", "alice@example.com").await;
    let bob = seed_student(&db, "Bob", "Jones", "bob@example.com").await;

    StudentService::enroll(&db, alice.id, course.id).await.unwrap();
    StudentService::enroll(&db, bob.id, course.id).await.unwrap();

    StudentService::delete(&db, alice.id).await.unwrap();

    let err = StudentService::get(&db, alice.id).await.unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
    assert_eq!(
        StudentService::count_in_course(&db, course.id).await.unwrap(),
        1
    );
}
