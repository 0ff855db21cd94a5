//! Explicit request validation, run before any service call. Failures
//! collect into a per-field list rather than stopping at the first one.

use crate::dtos::course::{CreateCourseRequest, UpdateCourseRequest};
use crate::dtos::instructor::{CreateInstructorRequest, UpdateInstructorRequest};
use crate::dtos::review::CreateReviewRequest;
use crate::dtos::student::{CreateStudentRequest, UpdateStudentRequest};
use crate::error::{ApiError, FieldError};

#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError {
                field: field.to_owned(),
                message: format!("{field} must not be blank"),
                rejected_value: Some(value.to_owned()),
            });
        }
        self
    }

    fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.contains('@') || value.len() < 3 {
            self.errors.push(FieldError {
                field: field.to_owned(),
                message: format!("{field} must be a valid email address"),
                rejected_value: Some(value.to_owned()),
            });
        }
        self
    }

    fn rating(&mut self, field: &str, value: i16) -> &mut Self {
        if !(1..=5).contains(&value) {
            self.errors.push(FieldError {
                field: field.to_owned(),
                message: format!("{field} must be between 1 and 5"),
                rejected_value: Some(value.to_string()),
            });
        }
        self
    }

    fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

pub fn validate_create_instructor(req: &CreateInstructorRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    v.require("first_name", &req.first_name)
        .require("last_name", &req.last_name)
        .require("email", &req.email)
        .email("email", &req.email);
    v.finish()
}

pub fn validate_update_instructor(req: &UpdateInstructorRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    if let Some(first_name) = &req.first_name {
        v.require("first_name", first_name);
    }
    if let Some(last_name) = &req.last_name {
        v.require("last_name", last_name);
    }
    if let Some(email) = &req.email {
        v.require("email", email).email("email", email);
    }
    v.finish()
}

pub fn validate_create_student(req: &CreateStudentRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    v.require("first_name", &req.first_name)
        .require("last_name", &req.last_name)
        .require("email", &req.email)
        .email("email", &req.email);
    v.finish()
}

pub fn validate_update_student(req: &UpdateStudentRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    if let Some(first_name) = &req.first_name {
        v.require("first_name", first_name);
    }
    if let Some(last_name) = &req.last_name {
        v.require("last_name", last_name);
    }
    if let Some(email) = &req.email {
        v.require("email", email).email("email", email);
    }
    v.finish()
}

pub fn validate_create_course(req: &CreateCourseRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    v.require("title", &req.title);
    v.finish()
}

pub fn validate_update_course(req: &UpdateCourseRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    if let Some(title) = &req.title {
        v.require("title", title);
    }
    v.finish()
}

pub fn validate_create_review(req: &CreateReviewRequest) -> Result<(), ApiError> {
    let mut v = Validator::default();
    v.require("comment", &req.comment).rating("rating", req.rating);
    v.finish()
}
