//! 家长关系存储操作

use super::SeaOrmStorage;
use crate::entity::parent_students::{Column, Entity as ParentStudentsEntity};
use crate::entity::prelude::*;
use crate::entity::students;
use crate::errors::{Result, SchoolSystemError};
use crate::models::users::responses::ChildRef;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

impl SeaOrmStorage {
    /// 家长关联的全部孩子
    pub async fn list_children_impl(&self, parent_id: i64) -> Result<Vec<ChildRef>> {
        let links = ParentStudentsEntity::find()
            .filter(Column::ParentId.eq(parent_id))
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询家长关联失败: {e}")))?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let student_rows = Students::find()
            .filter(
                students::Column::Id.is_in(links.iter().map(|l| l.student_id).collect::<Vec<_>>()),
            )
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询学生档案失败: {e}")))?;

        let class_names = self
            .class_name_map(
                student_rows
                    .iter()
                    .filter_map(|(s, _)| s.class_id)
                    .collect(),
            )
            .await?;

        Ok(student_rows
            .into_iter()
            .map(|(s, user)| ChildRef {
                student_id: s.id,
                full_name: user
                    .map(|u| format!("{} {}", u.first_name, u.last_name))
                    .unwrap_or_default(),
                class_id: s.class_id,
                class_name: s.class_id.and_then(|id| class_names.get(&id).cloned()),
            })
            .collect())
    }
}
