use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 奖学金类型
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct ScholarshipType {
    pub id: i64,
    pub name: String,
    pub duration_semesters: i32,
}

// 奖学金发放记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct Scholarship {
    pub id: i64,
    pub student_id: i64,
    pub scholarship_type_id: i64,
    pub amount: f64,
    pub start_date: chrono::DateTime<chrono::Utc>,
}
