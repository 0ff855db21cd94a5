use crate::entities::{course, instructor, review, student_course};
use crate::error::{DataError, DataResult};
use crate::services::instructor::InstructorService;
use futures::future;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

const ENTITY: &str = "Course";

pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
}

#[derive(Default)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<Uuid>,
}

pub struct CourseService;

impl CourseService {
    /// Creates a course for an existing instructor. Duplicate
    /// (title, instructor) pairs are not blocked here; callers that want
    /// to prevent them use [`Self::exists_by_title_and_instructor`].
    pub async fn create(db: &DatabaseConnection, new: NewCourse) -> DataResult<course::Model> {
        let txn = db.begin().await?;
        InstructorService::require(&txn, new.instructor_id).await?;

        let now = super::now();
        let instructor_id = new.instructor_id;
        let model = course::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new.title),
            description: Set(new.description),
            instructor_id: Set(Some(instructor_id)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            DataError::from_write(err, ENTITY, "instructor_id", &instructor_id.to_string())
        })?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> DataResult<course::Model> {
        Self::require(db, id).await
    }

    /// Fetches a course together with its instructor and all reviews
    /// (newest first) in one round of batched reads.
    pub async fn get_detail(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> DataResult<(course::Model, Option<instructor::Model>, Vec<review::Model>)> {
        let model = Self::require(db, id).await?;
        let instructor_id = model.instructor_id;

        let instructor_find = async move {
            match instructor_id {
                Some(iid) => instructor::Entity::find_by_id(iid).one(db).await,
                None => Ok(None),
            }
        };
        let reviews_find = review::Entity::find()
            .filter(review::Column::CourseId.eq(id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(db);

        let (instructor, reviews) = future::try_join(instructor_find, reviews_find).await?;
        Ok((model, instructor, reviews))
    }

    /// Query courses with pagination and filtering
    pub async fn list_paginated(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        search: Option<String>,
        instructor: Option<String>,
    ) -> DataResult<(Vec<course::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(term) = search
            && !term.trim().is_empty()
        {
            condition = condition.add(
                Condition::any()
                    .add(super::contains_insensitive(course::Column::Title, &term))
                    .add(super::contains_insensitive(
                        course::Column::Description,
                        &term,
                    )),
            );
        }

        if let Some(name) = instructor
            && !name.trim().is_empty()
        {
            let instructor_ids = Self::instructor_ids_by_name(db, &name).await?;
            if instructor_ids.is_empty() {
                return Ok((vec![], 0));
            }
            condition = condition.add(course::Column::InstructorId.is_in(instructor_ids));
        }

        let query = course::Entity::find()
            .filter(condition)
            .order_by_asc(course::Column::Title);

        let per_page = per_page.max(1);
        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let courses = paginator.fetch_page(page.saturating_sub(1)).await?; // SeaORM uses 0-based pages

        Ok((courses, total_items))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        update: UpdateCourse,
    ) -> DataResult<course::Model> {
        let model = Self::require(db, id).await?;

        if let Some(instructor_id) = update.instructor_id {
            InstructorService::require(db, instructor_id).await?;
        }

        let mut active: course::ActiveModel = model.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(Some(description));
        }
        if let Some(instructor_id) = update.instructor_id {
            active.instructor_id = Set(Some(instructor_id));
        }
        active.updated_at = Set(super::now());

        Ok(active.update(db).await?)
    }

    /// Deletes a course, its reviews, and its enrollment rows in one
    /// transaction. Students and the instructor survive.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> DataResult<()> {
        let txn = db.begin().await?;
        Self::require(&txn, id).await?;

        let reviews = review::Entity::delete_many()
            .filter(review::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        let enrollments = student_course::Entity::delete_many()
            .filter(student_course::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        course::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        log::debug!(
            "deleted course {id}, cascaded {} reviews and {} enrollment rows",
            reviews.rows_affected,
            enrollments.rows_affected
        );
        Ok(())
    }

    pub async fn find_by_instructor(
        db: &DatabaseConnection,
        instructor_id: Uuid,
    ) -> DataResult<Vec<course::Model>> {
        InstructorService::require(db, instructor_id).await?;

        Ok(course::Entity::find()
            .filter(course::Column::InstructorId.eq(instructor_id))
            .order_by_asc(course::Column::Title)
            .all(db)
            .await?)
    }

    /// Courses taught by any instructor whose name matches the composite
    /// full-name search.
    pub async fn find_by_instructor_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> DataResult<Vec<course::Model>> {
        let instructor_ids = Self::instructor_ids_by_name(db, name).await?;
        if instructor_ids.is_empty() {
            return Ok(vec![]);
        }

        Ok(course::Entity::find()
            .filter(course::Column::InstructorId.is_in(instructor_ids))
            .order_by_asc(course::Column::Title)
            .all(db)
            .await?)
    }

    /// Case-insensitive existence probe on the (title, instructor) pair.
    /// The store itself never enforces this pair unique.
    pub async fn exists_by_title_and_instructor(
        db: &DatabaseConnection,
        title: &str,
        instructor_id: Uuid,
    ) -> DataResult<bool> {
        Ok(course::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(course::Column::Title)))
                    .eq(title.to_lowercase()),
            )
            .filter(course::Column::InstructorId.eq(instructor_id))
            .count(db)
            .await?
            > 0)
    }

    pub async fn count_by_instructor(
        db: &DatabaseConnection,
        instructor_id: Uuid,
    ) -> DataResult<u64> {
        Ok(course::Entity::find()
            .filter(course::Column::InstructorId.eq(instructor_id))
            .count(db)
            .await?)
    }

    pub(crate) async fn require<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> DataResult<course::Model> {
        course::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(DataError::not_found(ENTITY, id))
    }

    async fn instructor_ids_by_name(db: &DatabaseConnection, name: &str) -> DataResult<Vec<Uuid>> {
        Ok(instructor::Entity::find()
            .select_only()
            .column(instructor::Column::Id)
            .filter(super::full_name_condition(
                instructor::Column::FirstName,
                instructor::Column::LastName,
                name,
            ))
            .into_tuple()
            .all(db)
            .await?)
    }
}
