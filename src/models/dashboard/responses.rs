use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::announcements::responses::AnnouncementEntry;
use crate::models::classes::responses::TeacherClass;
use crate::models::grades::responses::GradeEntry;
use crate::models::lessons::responses::TeacherScheduleEntry;

// 下一节课（relative_day 为 Today / Tomorrow / 星期名）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct NextLesson {
    pub lesson_id: i64,
    pub course_name: String,
    pub subject_name: String,
    pub room_name: Option<String>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
    pub relative_day: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub next_lesson: Option<NextLesson>,
    pub recent_grades: Vec<GradeEntry>,
    pub attendance_percentage: i32,
    pub announcements: Vec<AnnouncementEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TeacherDashboard {
    pub next_lesson: Option<NextLesson>,
    pub recent_lessons: Vec<TeacherScheduleEntry>,
    pub classes: Vec<TeacherClass>,
    pub announcements: Vec<AnnouncementEntry>,
}

// 家长仪表盘中每个孩子的摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ChildSummary {
    pub student_id: i64,
    pub full_name: String,
    pub class_name: Option<String>,
    pub attendance_percentage: i32,
    pub recent_grades: Vec<GradeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct ParentDashboard {
    pub children: Vec<ChildSummary>,
    pub announcements: Vec<AnnouncementEntry>,
}

// 管理员统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminStats {
    pub students: i64,
    pub teachers: i64,
    pub courses: i64,
    pub lessons_today: i64,
}
