use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Owning side of the one-to-one with instructor_details
    pub instructor_detail_id: Option<Uuid>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instructor_detail::Entity",
        from = "Column::InstructorDetailId",
        to = "super::instructor_detail::Column::Id"
    )]
    InstructorDetail,
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,
}

impl Related<super::instructor_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstructorDetail.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
