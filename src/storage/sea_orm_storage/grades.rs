//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as GradesEntity};
use crate::errors::{Result, SchoolSystemError};
use crate::models::grades::{
    entities::Grade,
    requests::{CreateGradeRequest, UpdateGradeRequest},
    responses::GradeEntry,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 学生成绩列表，新在前
    pub async fn list_student_grades_impl(
        &self,
        student_id: i64,
        since: Option<i64>,
        limit: Option<u64>,
    ) -> Result<Vec<GradeEntry>> {
        let mut select = GradesEntity::find().filter(Column::StudentId.eq(student_id));

        if let Some(since) = since {
            select = select.filter(Column::CreatedAt.gte(since));
        }

        select = select.order_by_desc(Column::CreatedAt);

        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let grade_rows = select
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        let course_names = self
            .course_name_map(grade_rows.iter().map(|g| g.course_id).collect())
            .await?;

        Ok(grade_rows
            .into_iter()
            .map(|g| {
                let (course_name, subject_name) =
                    course_names.get(&g.course_id).cloned().unwrap_or_default();
                GradeEntry {
                    id: g.id,
                    value: g.value,
                    weight: g.weight,
                    comment: g.comment,
                    course_name,
                    subject_name,
                    created_at: chrono::DateTime::from_timestamp(g.created_at, 0)
                        .unwrap_or_default(),
                }
            })
            .collect())
    }

    /// 添加成绩（course_id 已由上层解析）
    pub async fn create_grade_impl(
        &self,
        course_id: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(course_id),
            lesson_id: Set(req.lesson_id),
            value: Set(req.value),
            weight: Set(req.weight),
            comment: Set(req.comment),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = GradesEntity::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 更新成绩
    pub async fn update_grade_impl(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        // 先检查成绩是否存在
        let existing = self.get_grade_by_id_impl(grade_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(grade_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(value) = update.value {
            model.value = Set(value);
        }

        if let Some(weight) = update.weight {
            model.weight = Set(weight);
        }

        if let Some(comment) = update.comment {
            model.comment = Set(Some(comment));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_grade_by_id_impl(grade_id).await
    }

    /// 删除成绩
    pub async fn delete_grade_impl(&self, grade_id: i64) -> Result<bool> {
        let result = GradesEntity::delete_by_id(grade_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
