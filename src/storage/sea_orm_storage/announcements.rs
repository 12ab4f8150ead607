//! 公告存储操作

use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as AnnouncementsEntity};
use crate::entity::prelude::*;
use crate::entity::users;
use crate::errors::{Result, SchoolSystemError};
use crate::models::announcements::{
    entities::Announcement, requests::CreateAnnouncementRequest, responses::AnnouncementEntry,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 公告列表，置顶优先、新在前；class_id 给定时限定该班级及全校公告
    pub async fn list_announcements_impl(
        &self,
        class_id: Option<i64>,
        limit: u64,
    ) -> Result<Vec<AnnouncementEntry>> {
        let mut select = AnnouncementsEntity::find();

        if let Some(class_id) = class_id {
            select = select.filter(
                Condition::any()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::ClassId.is_null()),
            );
        }

        let rows = select
            .order_by_desc(Column::IsPinned)
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("查询公告列表失败: {e}")))?;

        // 作者姓名
        let author_ids: Vec<i64> = rows.iter().map(|a| a.author_id).collect();
        let author_names: HashMap<i64, String> = if author_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(users::Column::Id.is_in(author_ids))
                .all(&self.db)
                .await
                .map_err(|e| SchoolSystemError::database_operation(format!("查询作者失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, format!("{} {}", u.first_name, u.last_name)))
                .collect()
        };

        let class_names = self
            .class_name_map(rows.iter().filter_map(|a| a.class_id).collect())
            .await?;

        Ok(rows
            .into_iter()
            .map(|a| AnnouncementEntry {
                id: a.id,
                title: a.title,
                content: a.content,
                is_pinned: a.is_pinned,
                author_name: author_names.get(&a.author_id).cloned(),
                class_name: a.class_id.and_then(|id| class_names.get(&id).cloned()),
                created_at: chrono::DateTime::from_timestamp(a.created_at, 0).unwrap_or_default(),
            })
            .collect())
    }

    /// 发布公告
    pub async fn create_announcement_impl(
        &self,
        author_id: i64,
        req: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            author_id: Set(author_id),
            class_id: Set(req.class_id),
            title: Set(req.title),
            content: Set(req.content),
            is_pinned: Set(req.is_pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolSystemError::database_operation(format!("发布公告失败: {e}")))?;

        Ok(result.into_announcement())
    }
}
