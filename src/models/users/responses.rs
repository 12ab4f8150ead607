use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{User, UserRole};
use crate::models::PaginationInfo;

// 单个用户响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 管理端用户列表行：用户 + 推导角色 + 学生附加信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListItem {
    #[serde(flatten)]
    pub user: User,
    pub role: Option<UserRole>,
    pub student_id: Option<i64>,
    pub class_name: Option<String>,
}

// 家长关联的孩子（家长侧代查的解析结果）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct ChildRef {
    pub student_id: i64,
    pub full_name: String,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
}

// 用户列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<UserListItem>,
    pub pagination: PaginationInfo,
}
