use crate::routes::{course, health, instructor, review, root, student};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        instructor::list_instructors,
        instructor::create_instructor,
        instructor::get_instructor,
        instructor::update_instructor,
        instructor::delete_instructor,
        instructor::attach_instructor_details,
        instructor::detach_instructor_details,
        instructor::get_instructor_courses,
        instructor::get_instructor_students,
        instructor::get_instructor_reviews,
        instructor::create_instructor_details,
        instructor::get_instructor_details,
        instructor::delete_instructor_details,
        student::list_students,
        student::create_student,
        student::get_student,
        student::update_student,
        student::delete_student,
        student::enroll_student,
        student::unenroll_student,
        student::get_course_students,
        course::get_courses,
        course::create_course,
        course::get_course_by_id,
        course::update_course,
        course::delete_course,
        review::get_course_reviews,
        review::create_course_review,
        review::get_latest_reviews,
        review::get_review_by_id,
        review::delete_review
    ),
    tags(
        (name = "Instructors", description = "Instructor and instructor-details endpoints"),
        (name = "Students", description = "Student and enrollment endpoints"),
        (name = "Courses", description = "Course related endpoints"),
        (name = "Reviews", description = "Course review endpoints"),
        (name = "Health", description = "Liveness probes"),
    ),
    info(
        title = "Edu Admin API",
        version = "1.0.0",
        description = "Educational administration API: instructors, students, courses, reviews",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
