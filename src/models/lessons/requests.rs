use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 创建课次请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CreateLessonRequest {
    pub class_id: i64,
    pub course_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    #[serde(default = "default_duration")]
    pub duration_min: i32,
}

fn default_duration() -> i32 {
    45
}

// 学生/家长课表查询
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct ScheduleQuery {
    pub student_id: Option<i64>,
    #[serde(default)]
    pub future: bool,
}

// 点名保存：单个学生的出勤记录（可附带随堂成绩）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct RegisterEntry {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub late_reason_id: Option<i64>,
    pub grade: Option<f64>,
    pub grade_comment: Option<String>,
}

// 点名保存请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct SaveRegisterRequest {
    pub entries: Vec<RegisterEntry>,
}
