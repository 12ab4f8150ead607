use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::AttendanceStatus;

// 管理端课次列表行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonSummary {
    pub id: i64,
    pub class_name: String,
    pub course_name: String,
    pub teacher_name: Option<String>,
    pub room_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub duration_min: i32,
}

// 学生课表行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct ScheduleEntry {
    pub lesson_id: i64,
    pub course_name: String,
    pub subject_name: String,
    pub teacher_name: Option<String>,
    pub room_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
    pub is_absent: bool,
}

// 教师课表行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct TeacherScheduleEntry {
    pub lesson_id: i64,
    pub class_name: String,
    pub course_name: String,
    pub room_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
}

// 点名册中的学生行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct RegisterStudent {
    pub student_id: i64,
    pub student_number: i64,
    pub full_name: String,
    pub status: AttendanceStatus,
    pub late_reason_id: Option<i64>,
    pub grade: Option<f64>,
}

// 课次详情（点名册）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonRegister {
    pub lesson_id: i64,
    pub class_id: i64,
    pub class_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
    pub students: Vec<RegisterStudent>,
}

// 学年出勤汇总
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct AttendanceSummary {
    pub conducted_lessons: i64,
    pub absences: i64,
    pub percentage: i64,
}
