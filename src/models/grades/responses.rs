use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩行（含课程与科目名）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeEntry {
    pub id: i64,
    pub value: f64,
    pub weight: f64,
    pub comment: Option<String>,
    pub course_name: String,
    pub subject_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 指定学生的成绩列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentGradesResponse {
    pub student_id: i64,
    pub items: Vec<GradeEntry>,
}
