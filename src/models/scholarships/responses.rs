use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::ScholarshipType;

// 管理端发放记录行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct ScholarshipGrant {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub class_name: Option<String>,
    pub type_name: String,
    pub amount: f64,
    pub start_date: chrono::DateTime<chrono::Utc>,
}

// 学生持有的奖学金行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct ActiveScholarship {
    pub id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub amount: f64,
    pub start_date: chrono::DateTime<chrono::Utc>,
}

// 学生侧：已持有 + 可申请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct MyScholarshipsResponse {
    pub active: Vec<ActiveScholarship>,
    pub available: Vec<ScholarshipType>,
}
