use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on courses.instructor_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_instructor_id")
                    .table(Courses::Table)
                    .col(Courses::InstructorId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.course_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_course_id")
                    .table(Reviews::Table)
                    .col(Reviews::CourseId)
                    .to_owned(),
            )
            .await?;

        // Index on reviews.created_at for the latest-reviews ordering
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_created_at")
                    .table(Reviews::Table)
                    .col(Reviews::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // One enrollment row per (student, course) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_student_courses_student_id_course_id")
                    .table(StudentCourses::Table)
                    .col(StudentCourses::StudentId)
                    .col(StudentCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on student_courses.course_id for membership lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_student_courses_course_id")
                    .table(StudentCourses::Table)
                    .col(StudentCourses::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_courses_course_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_courses_student_id_course_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reviews_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_reviews_course_id").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_courses_instructor_id").to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    InstructorId,
}

#[derive(Iden)]
enum Reviews {
    Table,
    CourseId,
    CreatedAt,
}

#[derive(Iden)]
enum StudentCourses {
    Table,
    StudentId,
    CourseId,
}
