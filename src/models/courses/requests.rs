use serde::Deserialize;
use ts_rs::TS;

// 创建课程请求（同时建立授课教师关联）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub name: String,
    pub subject_id: i64,
    pub teacher_id: i64, // staff id
    pub description: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

// 学生/家长侧课程查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct StudentCoursesQuery {
    pub student_id: Option<i64>,
}
