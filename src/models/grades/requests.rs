use serde::Deserialize;
use ts_rs::TS;

// 新增成绩请求：course_id 与 lesson_id 至少给出一个，
// 只给 lesson_id 时课程从课次解析
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub course_id: Option<i64>,
    pub lesson_id: Option<i64>,
    pub value: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
    pub comment: Option<String>,
}

fn default_weight() -> f64 {
    1.0
}

// 更新成绩请求（部分字段）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub value: Option<f64>,
    pub weight: Option<f64>,
    pub comment: Option<String>,
}

// 学生/家长侧成绩查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct MyGradesQuery {
    pub student_id: Option<i64>,
}
