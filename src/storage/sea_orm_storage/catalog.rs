//! 基础目录存储操作（科目、教师、教室）

use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{rooms, subjects};
use crate::errors::{Result, SchoolSystemError};
use crate::models::catalog::responses::{RoomRef, SubjectRef, TeacherRef};
use sea_orm::{EntityTrait, QueryOrder};

impl SeaOrmStorage {
    /// 全部科目，按名称排序
    pub async fn list_subjects_impl(&self) -> Result<Vec<SubjectRef>> {
        let rows = Subjects::find()
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|s| SubjectRef {
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    /// 全部教职工及姓名，按姓氏排序
    pub async fn list_teachers_impl(&self) -> Result<Vec<TeacherRef>> {
        let rows = Staff::find()
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolSystemError::database_operation(format!("查询教职工列表失败: {e}"))
            })?;

        let mut teachers: Vec<(String, TeacherRef)> = rows
            .into_iter()
            .filter_map(|(s, user)| {
                user.map(|u| {
                    (
                        u.last_name.clone(),
                        TeacherRef {
                            staff_id: s.id,
                            full_name: format!("{} {}", u.first_name, u.last_name),
                        },
                    )
                })
            })
            .collect();
        teachers.sort_by(|(a, _), (b, _)| a.cmp(b));

        Ok(teachers.into_iter().map(|(_, t)| t).collect())
    }

    /// 全部教室，按名称排序
    pub async fn list_rooms_impl(&self) -> Result<Vec<RoomRef>> {
        let rows = Rooms::find()
            .order_by_asc(rooms::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| RoomRef {
                id: r.id,
                name: r.name,
            })
            .collect())
    }
}
