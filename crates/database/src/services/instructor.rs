use crate::entities::{course, instructor, instructor_detail};
use crate::error::{DataError, DataResult};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

const ENTITY: &str = "Instructor";
const DETAIL_ENTITY: &str = "InstructorDetails";

pub struct NewInstructor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub details: Option<NewInstructorDetail>,
}

pub struct NewInstructorDetail {
    pub youtube_channel: Option<String>,
    pub hobby: Option<String>,
}

#[derive(Default)]
pub struct UpdateInstructor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

pub struct InstructorService;

impl InstructorService {
    /// Creates an instructor, optionally together with its details row,
    /// in one transaction.
    pub async fn create(
        db: &DatabaseConnection,
        new: NewInstructor,
    ) -> DataResult<(instructor::Model, Option<instructor_detail::Model>)> {
        let txn = db.begin().await?;

        if Self::email_taken(&txn, &new.email, None).await? {
            return Err(DataError::AlreadyExists {
                entity: ENTITY,
                field: "email",
                value: new.email,
            });
        }

        let now = super::now();
        let details = match new.details {
            Some(details) => Some(
                instructor_detail::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    youtube_channel: Set(details.youtube_channel),
                    hobby: Set(details.hobby),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?,
            ),
            None => None,
        };

        let email = new.email;
        let model = instructor::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(email.clone()),
            instructor_detail_id: Set(details.as_ref().map(|d| d.id)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|err| DataError::from_write(err, ENTITY, "email", &email))?;

        txn.commit().await?;
        Ok((model, details))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> DataResult<instructor::Model> {
        Self::require(db, id).await
    }

    /// Fetches an instructor together with its details, fully populated.
    pub async fn get_with_details(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> DataResult<(instructor::Model, Option<instructor_detail::Model>)> {
        let model = Self::require(db, id).await?;
        let details = match model.instructor_detail_id {
            Some(detail_id) => {
                instructor_detail::Entity::find_by_id(detail_id)
                    .one(db)
                    .await?
            }
            None => None,
        };
        Ok((model, details))
    }

    /// Lists instructors, optionally narrowed by the composite full-name
    /// search.
    pub async fn list(
        db: &DatabaseConnection,
        search: Option<&str>,
    ) -> DataResult<Vec<instructor::Model>> {
        let mut query = instructor::Entity::find();

        if let Some(term) = search
            && !term.trim().is_empty()
        {
            query = query.filter(super::full_name_condition(
                instructor::Column::FirstName,
                instructor::Column::LastName,
                term,
            ));
        }

        Ok(query
            .order_by_asc(instructor::Column::LastName)
            .order_by_asc(instructor::Column::FirstName)
            .all(db)
            .await?)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        update: UpdateInstructor,
    ) -> DataResult<instructor::Model> {
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
        let mut active: instructor::ActiveModel = model.into();
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

    /// Deletes an instructor, cascading its details and orphaning its
    /// courses, all inside one transaction.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> DataResult<()> {
        let txn = db.begin().await?;
        let model = Self::require(&txn, id).await?;

        // Courses survive the instructor; the reference is nulled and the
        // rows are touched so updated_at reflects the write.
        course::Entity::update_many()
            .col_expr(course::Column::InstructorId, Expr::value(None::<Uuid>))
            .col_expr(course::Column::UpdatedAt, Expr::value(super::now()))
            .filter(course::Column::InstructorId.eq(id))
            .exec(&txn)
            .await?;

        instructor::Entity::delete_by_id(id).exec(&txn).await?;

        if let Some(detail_id) = model.instructor_detail_id {
            instructor_detail::Entity::delete_by_id(detail_id)
                .exec(&txn)
                .await?;
            log::debug!("deleted instructor {id}, cascaded details {detail_id}");
        }

        txn.commit().await?;
        Ok(())
    }

    /// Links an existing details row to an instructor. Both sides must be
    /// free: the instructor must not own details yet and the details row
    /// must not be owned elsewhere.
    pub async fn attach_details(
        db: &DatabaseConnection,
        instructor_id: Uuid,
        detail_id: Uuid,
    ) -> DataResult<(instructor::Model, instructor_detail::Model)> {
        let txn = db.begin().await?;
        let model = Self::require(&txn, instructor_id).await?;

        if let Some(existing) = model.instructor_detail_id {
            return Err(DataError::AlreadyExists {
                entity: DETAIL_ENTITY,
                field: "instructor_id",
                value: existing.to_string(),
            });
        }

        let details = instructor_detail::Entity::find_by_id(detail_id)
            .one(&txn)
            .await?
            .ok_or(DataError::not_found(DETAIL_ENTITY, detail_id))?;

        let linked_elsewhere = instructor::Entity::find()
            .filter(instructor::Column::InstructorDetailId.eq(detail_id))
            .count(&txn)
            .await?
            > 0;
        if linked_elsewhere {
            return Err(DataError::AlreadyExists {
                entity: ENTITY,
                field: "instructor_detail_id",
                value: detail_id.to_string(),
            });
        }

        let mut active: instructor::ActiveModel = model.into();
        active.instructor_detail_id = Set(Some(detail_id));
        active.updated_at = Set(super::now());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok((updated, details))
    }

    /// Unlinks the details row, leaving it orphaned but intact.
    pub async fn detach_details(
        db: &DatabaseConnection,
        instructor_id: Uuid,
    ) -> DataResult<instructor::Model> {
        let model = Self::require(db, instructor_id).await?;

        if model.instructor_detail_id.is_none() {
            return Err(DataError::IllegalState(format!(
                "instructor {instructor_id} has no details attached"
            )));
        }

        let mut active: instructor::ActiveModel = model.into();
        active.instructor_detail_id = Set(None);
        active.updated_at = Set(super::now());
        Ok(active.update(db).await?)
    }

    pub async fn create_details(
        db: &DatabaseConnection,
        new: NewInstructorDetail,
    ) -> DataResult<instructor_detail::Model> {
        let now = super::now();
        Ok(instructor_detail::ActiveModel {
            id: Set(Uuid::new_v4()),
            youtube_channel: Set(new.youtube_channel),
            hobby: Set(new.hobby),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?)
    }

    pub async fn get_details(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> DataResult<instructor_detail::Model> {
        instructor_detail::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DataError::not_found(DETAIL_ENTITY, id))
    }

    /// Deletes a details row, which must be orphaned; details owned by an
    /// instructor only go away with their owner.
    pub async fn delete_details(db: &DatabaseConnection, id: Uuid) -> DataResult<()> {
        let txn = db.begin().await?;

        instructor_detail::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DataError::not_found(DETAIL_ENTITY, id))?;

        let linked = instructor::Entity::find()
            .filter(instructor::Column::InstructorDetailId.eq(id))
            .count(&txn)
            .await?
            > 0;
        if linked {
            return Err(DataError::IllegalState(format!(
                "instructor details {id} are linked to an instructor"
            )));
        }

        instructor_detail::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn exists_by_email(db: &DatabaseConnection, email: &str) -> DataResult<bool> {
        Self::email_taken(db, email, None).await
    }

    pub(crate) async fn require<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> DataResult<instructor::Model> {
        instructor::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(DataError::not_found(ENTITY, id))
    }

    async fn email_taken<C: ConnectionTrait>(
        conn: &C,
        email: &str,
        exclude: Option<Uuid>,
    ) -> DataResult<bool> {
        let mut query = instructor::Entity::find().filter(instructor::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(instructor::Column::Id.ne(id));
        }
        Ok(query.count(conn).await? > 0)
    }
}
