use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::announcements::responses::AnnouncementEntry;

// 管理端班级列表行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummary {
    pub id: i64,
    pub name: String,
    pub main_teacher_name: Option<String>,
    pub student_count: i64,
}

// 教师端班级列表行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct TeacherClass {
    pub id: i64,
    pub name: String,
    pub student_count: i64,
    pub is_main_teacher: bool,
}

// 班级名册行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassStudent {
    pub student_id: i64,
    pub student_number: i64,
    pub full_name: String,
}

// 班级详情中的课次行
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassLesson {
    pub id: i64,
    pub course_name: String,
    pub subject_name: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub time_slot: String,
}

// 班级详情
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetail {
    pub id: i64,
    pub name: String,
    pub main_teacher_name: Option<String>,
    pub students: Vec<ClassStudent>,
    pub lessons: Vec<ClassLesson>,
    pub announcements: Vec<AnnouncementEntry>,
}

// 学生/家长视角的班级信息；未分班时各字段为空
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct StudentClassInfo {
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub educator_name: Option<String>,
    pub educator_email: Option<String>,
    pub announcements: Vec<AnnouncementEntry>,
}

impl StudentClassInfo {
    pub fn unassigned() -> Self {
        Self {
            class_id: None,
            class_name: None,
            educator_name: None,
            educator_email: None,
            announcements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StudentClassInfo;

    #[test]
    fn test_unassigned_class_info_is_empty() {
        let info = StudentClassInfo::unassigned();
        assert!(info.class_id.is_none());
        assert!(info.class_name.is_none());
        assert!(info.educator_name.is_none());
        assert!(info.announcements.is_empty());
    }
}
