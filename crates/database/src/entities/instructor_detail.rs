use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Extra profile data exclusively owned by at most one instructor. A row
/// may exist unlinked (orphaned) until attached or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructor_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub youtube_channel: Option<String>,
    pub hobby: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::instructor::Entity")]
    Instructor,
}

impl Related<super::instructor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
