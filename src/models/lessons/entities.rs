use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课次实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub class_id: i64,
    pub course_id: i64,
    pub teacher_id: Option<i64>,
    pub room_id: Option<i64>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub duration_min: i32,
}

// 出勤状态
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(serde::de::Error::custom(format!(
                "无效的出勤状态: '{s}'. 支持的状态: present, absent, late"
            ))),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Late => write!(f, "late"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_deserialize() {
        let status: AttendanceStatus = serde_json::from_str(r#""late""#).unwrap();
        assert_eq!(status, AttendanceStatus::Late);
        assert!(serde_json::from_str::<AttendanceStatus>(r#""excused""#).is_err());
    }
}
