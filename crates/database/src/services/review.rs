use crate::entities::{course, review};
use crate::error::{DataError, DataResult};
use crate::services::course::CourseService;
use crate::services::instructor::InstructorService;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

const ENTITY: &str = "Review";

pub struct NewReview {
    pub course_id: Uuid,
    pub comment: String,
    pub rating: i16,
}

pub struct ReviewService;

impl ReviewService {
    /// Creates a review for an existing course. Reviews are never
    /// re-parented afterwards.
    pub async fn create(db: &DatabaseConnection, new: NewReview) -> DataResult<review::Model> {
        let txn = db.begin().await?;
        CourseService::require(&txn, new.course_id).await?;

        let course_id = new.course_id;
        let model = review::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            comment: Set(new.comment),
            rating: Set(new.rating),
            created_at: Set(super::now()),
        }
        .insert(&txn)
        .await
        .map_err(|err| DataError::from_write(err, ENTITY, "course_id", &course_id.to_string()))?;

        txn.commit().await?;
        Ok(model)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> DataResult<review::Model> {
        review::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DataError::not_found(ENTITY, id))
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> DataResult<()> {
        let found = review::Entity::delete_by_id(id).exec(db).await?;
        if found.rows_affected == 0 {
            return Err(DataError::not_found(ENTITY, id));
        }
        Ok(())
    }

    /// Reviews for one course, newest first (id breaks timestamp ties).
    pub async fn find_by_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> DataResult<Vec<review::Model>> {
        CourseService::require(db, course_id).await?;

        Ok(review::Entity::find()
            .filter(review::Column::CourseId.eq(course_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(db)
            .await?)
    }

    /// The most recent reviews across all courses.
    pub async fn find_latest(db: &DatabaseConnection, limit: u64) -> DataResult<Vec<review::Model>> {
        Ok(review::Entity::find()
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .limit(limit)
            .all(db)
            .await?)
    }

    /// All reviews of an instructor's courses, newest first.
    pub async fn find_by_instructor(
        db: &DatabaseConnection,
        instructor_id: Uuid,
    ) -> DataResult<Vec<review::Model>> {
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

        Ok(review::Entity::find()
            .filter(review::Column::CourseId.is_in(course_ids))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn count_by_course(db: &DatabaseConnection, course_id: Uuid) -> DataResult<u64> {
        Ok(review::Entity::find()
            .filter(review::Column::CourseId.eq(course_id))
            .count(db)
            .await?)
    }
}
