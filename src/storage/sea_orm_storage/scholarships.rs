//! 奖学金存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::scholarships::{ActiveModel, Column, Entity as ScholarshipsEntity};
use crate::entity::{scholarship_types, students};
use crate::errors::{Result, SchoolSystemError};
use crate::models::scholarships::{
    entities::{Scholarship, ScholarshipType},
    responses::{ActiveScholarship, ScholarshipGrant},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 全部奖学金类型
    pub async fn list_scholarship_types_impl(&self) -> Result<Vec<ScholarshipType>> {
        let rows = ScholarshipTypes::find()
            .order_by_asc(scholarship_types::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询奖学金类型失败: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_scholarship_type()).collect())
    }

    /// 通过 ID 获取奖学金类型
    pub async fn get_scholarship_type_impl(&self, type_id: i64) -> Result<Option<ScholarshipType>> {
        let result = ScholarshipTypes::find_by_id(type_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询奖学金类型失败: {e}"))
            })?;

        Ok(result.map(|m| m.into_scholarship_type()))
    }

    /// 学生持有的奖学金
    pub async fn list_student_scholarships_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<ActiveScholarship>> {
        let rows = ScholarshipsEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(ScholarshipTypes)
            .order_by_desc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询奖学金失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(s, ty)| ActiveScholarship {
                id: s.id,
                type_id: s.scholarship_type_id,
                type_name: ty.map(|t| t.name).unwrap_or_default(),
                amount: s.amount,
                start_date: chrono::DateTime::from_timestamp(s.start_date, 0).unwrap_or_default(),
            })
            .collect())
    }

    /// 全部发放记录（管理端）
    pub async fn list_scholarships_impl(&self) -> Result<Vec<ScholarshipGrant>> {
        let rows = ScholarshipsEntity::find()
            .find_also_related(ScholarshipTypes)
            .order_by_desc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询发放记录失败: {e}")))?;

        // 学生姓名与班级
        let student_ids: Vec<i64> = rows.iter().map(|(s, _)| s.student_id).collect();
        let student_rows = if student_ids.is_empty() {
            Vec::new()
        } else {
            Students::find()
                .filter(students::Column::Id.is_in(student_ids))
                .find_also_related(Users)
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolSystemError::database_operation(format!("查询学生档案失败: {e}"))
                })?
        };

        let class_names = self
            .class_name_map(
                student_rows
                    .iter()
                    .filter_map(|(s, _)| s.class_id)
                    .collect(),
            )
            .await?;

        let student_map: HashMap<i64, (String, Option<String>)> = student_rows
            .into_iter()
            .map(|(s, user)| {
                (
                    s.id,
                    (
                        user.map(|u| format!("{} {}", u.first_name, u.last_name))
                            .unwrap_or_default(),
                        s.class_id.and_then(|id| class_names.get(&id).cloned()),
                    ),
                )
            })
            .collect();

        Ok(rows
            .into_iter()
            .map(|(s, ty)| {
                let (student_name, class_name) = student_map
                    .get(&s.student_id)
                    .cloned()
                    .unwrap_or_default();
                ScholarshipGrant {
                    id: s.id,
                    student_id: s.student_id,
                    student_name,
                    class_name,
                    type_name: ty.map(|t| t.name).unwrap_or_default(),
                    amount: s.amount,
                    start_date: chrono::DateTime::from_timestamp(s.start_date, 0)
                        .unwrap_or_default(),
                }
            })
            .collect())
    }

    /// 发放奖学金；同一学生同一类型重复时返回 Conflict
    pub async fn create_scholarship_impl(
        &self,
        student_id: i64,
        scholarship_type_id: i64,
        amount: f64,
        start_date: i64,
    ) -> Result<Scholarship> {
        let model = ActiveModel {
            student_id: Set(student_id),
            scholarship_type_id: Set(scholarship_type_id),
            amount: Set(amount),
            start_date: Set(start_date),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let err = SchoolSystemError::database_operation(format!("发放奖学金失败: {e}"));
            if err.is_unique_violation() {
                SchoolSystemError::conflict("该学生已持有此类型奖学金".to_string())
            } else {
                err
            }
        })?;

        Ok(result.into_scholarship())
    }

    /// 撤销奖学金
    pub async fn delete_scholarship_impl(&self, scholarship_id: i64) -> Result<bool> {
        let result = ScholarshipsEntity::delete_by_id(scholarship_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("撤销奖学金失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
