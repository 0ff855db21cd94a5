pub mod course;
pub mod instructor;
pub mod instructor_detail;
pub mod review;
pub mod student;
pub mod student_course;
