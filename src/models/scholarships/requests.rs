use serde::Deserialize;
use ts_rs::TS;

// 管理员发放奖学金请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct GrantScholarshipRequest {
    pub student_id: i64,
    pub scholarship_type_id: i64,
    pub amount: f64,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 学生自助申请请求（金额固定为默认值）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct ApplyScholarshipRequest {
    pub scholarship_type_id: i64,
}

// 学生/家长侧查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/scholarship.ts")]
pub struct MyScholarshipsQuery {
    pub student_id: Option<i64>,
}
