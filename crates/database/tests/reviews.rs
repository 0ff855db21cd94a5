mod common;

use common::*;
use database::error::DataError;
use database::services::course::CourseService;
use database::services::review::{NewReview, ReviewService};
use uuid::Uuid;

#[tokio::test]
async fn review_creation_requires_an_existing_course() {
    let db = setup().await;

    let err = ReviewService::create(
        &db,
        NewReview {
            course_id: Uuid::new_v4(),
            comment: "great".to_owned(),
            rating: 5,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DataError::NotFound {
            entity: "Course",
            ..
        }
    ));
}

#[tokio::test]
async fn deleting_a_course_cascades_its_reviews() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let first = seed_review(&db, course.id, "solid intro", 4).await;
    let second = seed_review(&db, course.id, "would retake", 5).await;

    CourseService::delete(&db, course.id).await.unwrap();

    assert_eq!(
        ReviewService::count_by_course(&db, course.id).await.unwrap(),
        0
    );
    for id in [first.id, second.id] {
        let err = ReviewService::get(&db, id).await.unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }
}

#[tokio::test]
async fn reviews_are_ordered_newest_first() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;

    let t1 = seed_review(&db, course.id, "first", 3).await;
    tick().await;
    let t2 = seed_review(&db, course.id, "second", 4).await;
    tick().await;
    let t3 = seed_review(&db, course.id, "third", 5).await;

    let ordered = ReviewService::find_by_course(&db, course.id).await.unwrap();
    let ids: Vec<_> = ordered.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![t3.id, t2.id, t1.id]);

    let latest = ReviewService::find_latest(&db, 10).await.unwrap();
    let ids: Vec<_> = latest.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![t3.id, t2.id, t1.id]);

    let top_two = ReviewService::find_latest(&db, 2).await.unwrap();
    let ids: Vec<_> = top_two.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![t3.id, t2.id]);
}

#[tokio::test]
async fn reviews_traverse_to_the_instructor() {
    let db = setup().await;
    let john = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let jane = seed_instructor(&db, "Jane", "Roe", "jane@example.com").await;
    let johns_course = seed_course(&db, john.id, "Rust 101").await;
    let janes_course = seed_course(&db, jane.id, "SQL 201").await;

    let on_johns = seed_review(&db, johns_course.id, "nice", 4).await;
    seed_review(&db, janes_course.id, "tough", 3).await;

    let reviews = ReviewService::find_by_instructor(&db, john.id).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, on_johns.id);
}

#[tokio::test]
async fn individual_review_delete_and_lookup() {
    let db = setup().await;
    let instructor = seed_instructor(&db, "John", "Doe", "john@example.com").await;
    let course = seed_course(&db, instructor.id, "Rust 101").await;
    let review = seed_review(&db, course.id, "fine", 3).await;

    let fetched = ReviewService::get(&db, review.id).await.unwrap();
    assert_eq!(fetched.comment, "fine");
    assert_eq!(fetched.course_id, course.id);

    ReviewService::delete(&db, review.id).await.unwrap();
    let err = ReviewService::delete(&db, review.id).await.unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }));
}
