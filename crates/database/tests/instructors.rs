mod common;

use common::*;
use database::entities::instructor;
use database::error::DataError;
use database::services::course::CourseService;
use database::services::instructor::{
    InstructorService, NewInstructor, NewInstructorDetail, UpdateInstructor,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn duplicate_email_is_rejected_and_leaves_one_row() {
    let db = setup().await;
    seed_instructor(&db, "John", "Doe", "john@example.com").await;

    let err = InstructorService::create(
        &db,
        NewInstructor {
            first_name: "Johnny".to_owned(),
            last_name: "Doeson".to_owned(),
            email: "john@example.com".to_owned(),
            details: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DataError::AlreadyExists { field: "email", .. }));

    let rows = instructor::Entity::find()
        .filter(instructor::Column::Email.eq("john@example.com"))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn deleting_instructor_cascades_details_and_orphans_courses() {
    let db = setup().await;
    let (instructor, details) =
        seed_instructor_with_details(&db, "John", "Doe", "john@example.com", "chess").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;

    tick().await;
    InstructorService::delete(&db, instructor.id).await.unwrap();

    let err = InstructorService::get_details(&db, details.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));

    // The course survives with a nulled instructor reference.
    let orphaned = CourseService::get(&db, course.id).await.unwrap();
    assert_eq!(orphaned.instructor_id, None);
    assert!(orphaned.updated_at > course.updated_at);
}

#[tokio::test]
async fn attach_and_detach_enforce_single_ownership() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let other = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;

    let details = InstructorService::create_details(
        &db,
        NewInstructorDetail {
            youtube_channel: Some("https://youtube.com/@johndoe".to_owned()),
            hobby: None,
        },
    )
    .await
    .unwrap();

    let (updated, _) = InstructorService::attach_details(&db, instructor.id, details.id)
        .await
        .unwrap();
    assert_eq!(updated.instructor_detail_id, Some(details.id));

    // A linked details row cannot be deleted or claimed by anyone else.
    let err = InstructorService::delete_details(&db, details.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::IllegalState(_)));

    let err = InstructorService::attach_details(&db, other.id, details.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::AlreadyExists { .. }));

    // The owner cannot attach a second row either.
    let spare = InstructorService::create_details(
        &db,
        NewInstructorDetail {
            youtube_channel: None,
            hobby: Some("golf".to_owned()),
        },
    )
    .await
    .unwrap();
    let err = InstructorService::attach_details(&db, instructor.id, spare.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::AlreadyExists { .. }));

    let detached = InstructorService::detach_details(&db, instructor.id)
        .await
        .unwrap();
    assert_eq!(detached.instructor_detail_id, None);

    let err = InstructorService::detach_details(&db, instructor.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::IllegalState(_)));

    // Orphaned now, so explicit deletion is allowed.
    InstructorService::delete_details(&db, details.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn full_name_search_matches_across_the_word_boundary() {
    let db = setup().await;
    let john = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;

    // "n D" only matches through the concatenated "John Doe" form.
    let found = InstructorService::list(&db, Some("n D")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, john.id);

    for term in ["john", "JOHN", "JoHn"] {
        let found = InstructorService::list(&db, Some(term)).await.unwrap();
        assert_eq!(found.len(), 1, "term {term:?} should match exactly one");
        assert_eq!(found[0].id, john.id);
    }
}

#[tokio::test]
async fn update_bumps_updated_at_and_keeps_created_at() {
    let db = setup().await;
    let (instructor, _) =
        seed_instructor_with_details(&db, "John", "Doe", "john@example.com", "chess").await;
    let (fetched, details) = InstructorService::get_with_details(&db, instructor.id)
        .await
        .unwrap();
    assert!(details.is_some());

    tick().await;
    InstructorService::update(
        &db,
        instructor.id,
        UpdateInstructor {
            first_name: Some("Jonathan".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let (after, _) = InstructorService::get_with_details(&db, instructor.id)
        .await
        .unwrap();
    assert_eq!(after.first_name, "Jonathan");
    assert_eq!(after.created_at, fetched.created_at);
    assert!(after.updated_at > fetched.updated_at);
}

#[tokio::test]
async fn updating_to_a_taken_email_is_rejected() {
    let db = setup().await;
    seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let jane = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;

    let err = InstructorService::update(
        &db,
        jane.id,
        UpdateInstructor {
            email: Some("john@example.com".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DataError::AlreadyExists { field: "email", .. }));
}
