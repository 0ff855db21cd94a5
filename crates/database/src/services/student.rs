use crate::entities::{course, instructor, student, student_course};
use crate::error::{DataError, DataResult};
use crate::services::course::CourseService;
use crate::services::instructor::InstructorService;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

const ENTITY: &str = "Student";

pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Default)]
pub struct UpdateStudent {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

pub struct StudentService;

impl StudentService {
    pub async fn create(db: &DatabaseConnection, new: NewStudent) -> DataResult<student::Model> {
        if Self::email_taken(db, &new.email, None).await? {
            return Err(DataError::AlreadyExists {
                entity: ENTITY,
                field: "email",
                value: new.email,
            });
        }

        let now = super::now();
        let email = new.email;
        student::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(email.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map_err(|err| DataError::from_write(err, ENTITY, "email", &email))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> DataResult<student::Model> {
        Self::require(db, id).await
    }

    /// Fetches a student with every enrolled course and each course's
    /// instructor, assembled in batches rather than per-row lookups.
    pub async fn get_with_courses(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> DataResult<(
        student::Model,
        Vec<(course::Model, Option<instructor::Model>)>,
    )> {
        let model = Self::require(db, id).await?;

        let enrollments: Vec<(student_course::Model, Option<course::Model>)> =
            student_course::Entity::find()
                .filter(student_course::Column::StudentId.eq(id))
                .order_by_asc(student_course::Column::CreatedAt)
                .find_also_related(course::Entity)
                .all(db)
                .await?;

        let courses: Vec<course::Model> = enrollments
            .into_iter()
            .filter_map(|(_, course)| course)
            .collect();

        let instructor_ids: Vec<Uuid> = courses
            .iter()
            .filter_map(|course| course.instructor_id)
            .collect();

        let instructors_by_id: HashMap<Uuid, instructor::Model> = if instructor_ids.is_empty() {
            HashMap::new()
        } else {
            instructor::Entity::find()
                .filter(instructor::Column::Id.is_in(instructor_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|instructor| (instructor.id, instructor))
                .collect()
        };

        let courses = courses
            .into_iter()
            .map(|course| {
                let instructor = course
                    .instructor_id
                    .and_then(|iid| instructors_by_id.get(&iid).cloned());
                (course, instructor)
            })
            .collect();

        Ok((model, courses))
    }

    pub async fn list(
        db: &DatabaseConnection,
        search: Option<&str>,
    ) -> DataResult<Vec<student::Model>> {
        let mut query = student::Entity::find();

        if let Some(term) = search
            && !term.trim().is_empty()
        {
            query = query.filter(super::full_name_condition(
                student::Column::FirstName,
                student::Column::LastName,
                term,
            ));
        }

        Ok(query
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        update: UpdateStudent,
    ) -> DataResult<student::Model> {
        let model = Self::require(db, id).await?;

        if let Some(email) = &update.email
            && Self::email_taken(db, email, Some(id)).await?
        {
            return Err(DataError::AlreadyExists {
                entity: ENTITY,
                field: "email",
                value: email.clone(),
            });
        }

        let email = update.email.clone().unwrap_or_else(|| model.email.clone());
        let mut active: student::ActiveModel = model.into();
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(new_email) = update.email {
            active.email = Set(new_email);
        }
        active.updated_at = Set(super::now());

        active
            .update(db)
            .await
            .map_err(|err| DataError::from_write(err, ENTITY, "email", &email))
    }

    /// Deletes a student and its enrollment rows; the courses themselves
    /// are untouched.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> DataResult<()> {
        let txn = db.begin().await?;
        Self::require(&txn, id).await?;

        let removed = student_course::Entity::delete_many()
            .filter(student_course::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        student::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        log::debug!(
            "deleted student {id} with {} enrollment rows",
            removed.rows_affected
        );
        Ok(())
    }

    /// Enrolls a student in a course. Enrolling twice is an error, not a
    /// silent no-op.
    pub async fn enroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DataResult<student_course::Model> {
        let txn = db.begin().await?;
        Self::require(&txn, student_id).await?;
        CourseService::require(&txn, course_id).await?;

        if Self::enrollment_exists(&txn, student_id, course_id).await? {
            return Err(DataError::IllegalState(format!(
                "student {student_id} is already enrolled in course {course_id}"
            )));
        }

        let row = student_course::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            created_at: Set(super::now()),
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            DataError::from_write(err, "Enrollment", "student_id", &student_id.to_string())
        })?;

        txn.commit().await?;
        Ok(row)
    }

    /// Removes an enrollment. Unenrolling a student who is not enrolled
    /// is an error.
    pub async fn unenroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DataResult<()> {
        let txn = db.begin().await?;
        Self::require(&txn, student_id).await?;
        CourseService::require(&txn, course_id).await?;

        let removed = student_course::Entity::delete_many()
            .filter(student_course::Column::StudentId.eq(student_id))
            .filter(student_course::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;

        if removed.rows_affected == 0 {
            return Err(DataError::IllegalState(format!(
                "student {student_id} is not enrolled in course {course_id}"
            )));
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn is_enrolled(
        db: &DatabaseConnection,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DataResult<bool> {
        Self::enrollment_exists(db, student_id, course_id).await
    }

    pub async fn find_enrolled_in_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> DataResult<Vec<student::Model>> {
        CourseService::require(db, course_id).await?;

        let rows = student_course::Entity::find()
            .filter(student_course::Column::CourseId.eq(course_id))
            .order_by_asc(student_course::Column::CreatedAt)
            .find_also_related(student::Entity)
            .all(db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, student)| student).collect())
    }

    pub async fn find_not_enrolled_in_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> DataResult<Vec<student::Model>> {
        CourseService::require(db, course_id).await?;

        let enrolled_ids: Vec<Uuid> = student_course::Entity::find()
            .select_only()
            .column(student_course::Column::StudentId)
            .filter(student_course::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(db)
            .await?;

        let mut query = student::Entity::find();
        if !enrolled_ids.is_empty() {
            query = query.filter(student::Column::Id.is_not_in(enrolled_ids));
        }

        Ok(query
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(db)
            .await?)
    }

    /// All students enrolled in any of an instructor's courses,
    /// de-duplicated.
    pub async fn find_by_instructor(
        db: &DatabaseConnection,
        instructor_id: Uuid,
    ) -> DataResult<Vec<student::Model>> {
        InstructorService::require(db, instructor_id).await?;

        let course_ids: Vec<Uuid> = course::Entity::find()
            .select_only()
            .column(course::Column::Id)
            .filter(course::Column::InstructorId.eq(instructor_id))
            .into_tuple()
            .all(db)
            .await?;
        if course_ids.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<Uuid> = student_course::Entity::find()
            .select_only()
            .column(student_course::Column::StudentId)
            .filter(student_course::Column::CourseId.is_in(course_ids))
            .distinct()
            .into_tuple()
            .all(db)
            .await?;
        if student_ids.is_empty() {
            return Ok(vec![]);
        }

        Ok(student::Entity::find()
            .filter(student::Column::Id.is_in(student_ids))
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(db)
            .await?)
    }

    pub async fn count_in_course(db: &DatabaseConnection, course_id: Uuid) -> DataResult<u64> {
        Ok(student_course::Entity::find()
            .filter(student_course::Column::CourseId.eq(course_id))
            .count(db)
            .await?)
    }

    pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> DataResult<bool> {
        Self::email_taken(db, email, None).await
    }

    pub(crate) async fn require<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> DataResult<student::Model> {
        student::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(DataError::not_found(ENTITY, id))
    }

    async fn enrollment_exists<C: ConnectionTrait>(
        conn: &C,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DataResult<bool> {
        Ok(student_course::Entity::find()
            .filter(student_course::Column::StudentId.eq(student_id))
            .filter(student_course::Column::CourseId.eq(course_id))
            .count(conn)
            .await?
            > 0)
    }

    async fn email_taken<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        exclude: Option<Uuid>,
    ) -> DataResult<bool> {
        let mut query = student::Entity::find().filter(student::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(student::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }
}
