//! 奖学金类型实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scholarship_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub duration_semesters: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::scholarships::Entity")]
    Scholarships,
}

impl Related<super::scholarships::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scholarships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_scholarship_type(self) -> crate::models::scholarships::entities::ScholarshipType {
        crate::models::scholarships::entities::ScholarshipType {
            id: self.id,
            name: self.name,
            duration_semesters: self.duration_semesters,
        }
    }
}
