use serde::Deserialize;
use ts_rs::TS;

// 学生仪表盘查询，家长代查时携带 student_id
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboardQuery {
    pub student_id: Option<i64>,
}
