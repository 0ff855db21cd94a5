use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create instructor_details table (referenced by instructors)
        manager
            .create_table(
                Table::create()
                    .table(InstructorDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstructorDetails::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InstructorDetails::YoutubeChannel).string())
                    .col(ColumnDef::new(InstructorDetails::Hobby).string())
                    .col(
                        ColumnDef::new(InstructorDetails::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorDetails::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create instructors table
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::FirstName).string().not_null())
                    .col(ColumnDef::new(Instructors::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Instructors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Instructors::InstructorDetailId).uuid())
                    .col(
                        ColumnDef::new(Instructors::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Instructors::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-instructors-instructor_detail_id")
                            .from(Instructors::Table, Instructors::InstructorDetailId)
                            .to(InstructorDetails::Table, InstructorDetails::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::InstructorId).uuid())
                    .col(ColumnDef::new(Courses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-instructor_id")
                            .from(Courses::Table, Courses::InstructorId)
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create reviews table
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reviews::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Reviews::Comment).text().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-course_id")
                            .from(Reviews::Table, Reviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_courses junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(StudentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentCourses::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentCourses::StudentId).uuid().not_null())
                    .col(ColumnDef::new(StudentCourses::CourseId).uuid().not_null())
                    .col(
                        ColumnDef::new(StudentCourses::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_courses-student_id")
                            .from(StudentCourses::Table, StudentCourses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_courses-course_id")
                            .from(StudentCourses::Table, StudentCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(StudentCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(InstructorDetails::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Instructors {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    InstructorDetailId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum InstructorDetails {
    Table,
    Id,
    YoutubeChannel,
    Hobby,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Description,
    InstructorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    CourseId,
    Comment,
    Rating,
    CreatedAt,
}

#[derive(Iden)]
enum StudentCourses {
    Table,
    Id,
    StudentId,
    CourseId,
    CreatedAt,
}
