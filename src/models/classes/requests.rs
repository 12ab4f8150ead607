use serde::Deserialize;
use ts_rs::TS;

// 创建班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub main_teacher_id: Option<i64>,
}

// 学生/家长侧班级信息查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassInfoQuery {
    pub student_id: Option<i64>,
}
