use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 公告列表行（附带作者姓名与班级名）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementEntry {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub author_name: Option<String>,
    pub class_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
