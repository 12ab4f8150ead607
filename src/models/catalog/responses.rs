use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目条目，供创建课程时选择
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct SubjectRef {
    pub id: i64,
    pub name: String,
}

// 教师条目，供创建课程/课次时选择
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct TeacherRef {
    pub staff_id: i64,
    pub full_name: String,
}

// 教室条目，供创建课次时选择
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/catalog.ts")]
pub struct RoomRef {
    pub id: i64,
    pub name: String,
}
