//! 奖学金发放实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scholarships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub scholarship_type_id: i64,
    pub amount: f64,
    pub start_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::scholarship_types::Entity",
        from = "Column::ScholarshipTypeId",
        to = "super::scholarship_types::Column::Id"
    )]
    ScholarshipType,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::scholarship_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScholarshipType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_scholarship(self) -> crate::models::scholarships::entities::Scholarship {
        use chrono::{DateTime, Utc};

        crate::models::scholarships::entities::Scholarship {
            id: self.id,
            student_id: self.student_id,
            scholarship_type_id: self.scholarship_type_id,
            amount: self.amount,
            start_date: DateTime::<Utc>::from_timestamp(self.start_date, 0).unwrap_or_default(),
        }
    }
}
