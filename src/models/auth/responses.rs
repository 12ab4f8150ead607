use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::{User, UserRole};

// 登录响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64, // 秒
    pub user: User,
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 刷新令牌响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

// 当前用户响应（含推导角色与档案 ID）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct CurrentUserResponse {
    pub user: User,
    pub role: UserRole,
    pub student_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub class_id: Option<i64>,
}
