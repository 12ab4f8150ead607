use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::grades::responses::GradeEntry;

// 管理端课程目录行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub subject_name: String,
    pub teacher_name: Option<String>,
    pub description: Option<String>,
    pub weight: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学生侧课程行（含本学年出勤统计）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct StudentCourse {
    pub id: i64,
    pub name: String,
    pub subject_name: String,
    pub teacher_name: Option<String>,
    pub conducted_lessons: i64,
    pub absences: i64,
    pub attendance_percentage: i64,
}

// 学生课程总览中的缺勤课次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct MissedLesson {
    pub lesson_id: i64,
    pub date: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
    pub was_late: bool,
}

// 学生课程总览
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseOverview {
    pub course: CourseSummary,
    pub grades: Vec<GradeEntry>,
    pub missed_lessons: Vec<MissedLesson>,
}

// 教师端课程学生行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseStudentEntry {
    pub student_id: i64,
    pub student_number: i64,
    pub full_name: String,
    pub class_name: Option<String>,
    pub grades: Vec<GradeEntry>,
}

// 教师端课程学生列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseStudentsResponse {
    pub course_id: i64,
    pub course_name: String,
    pub students: Vec<CourseStudentEntry>,
}
