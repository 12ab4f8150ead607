use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色（由档案表推导，不落库）
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Student, // 学生
    Parent,  // 家长
    Teacher, // 教师
    Staff,   // 其他教职工
    Admin,   // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const PARENT: &'static str = "parent";
    pub const TEACHER: &'static str = "teacher";
    pub const STAFF: &'static str = "staff";
    pub const ADMIN: &'static str = "admin";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    /// 可以管理课堂的角色
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Admin]
    }
    /// 教职工侧（教师仪表盘、班级列表）
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher, &Self::Staff, &Self::Admin]
    }
    /// 学生侧（学生本人或家长代查）
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student, &Self::Parent]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[
            &Self::Student,
            &Self::Parent,
            &Self::Teacher,
            &Self::Staff,
            &Self::Admin,
        ]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, parent, teacher, staff, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Parent => write!(f, "{}", UserRole::PARENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Staff => write!(f, "{}", UserRole::STAFF),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(UserRole::Student),
            "parent" => Ok(UserRole::Parent),
            "teacher" => Ok(UserRole::Teacher),
            "staff" => Ok(UserRole::Staff),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub pesel: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        role: &UserRole,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

/// 用户的角色档案（按 staff -> student -> parent 顺序检测）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct RoleProfile {
    pub role: UserRole,
    pub student_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub class_id: Option<i64>,
}

/// 认证中间件写入请求扩展的完整用户上下文
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct AuthenticatedUser {
    pub user: User,
    pub role: UserRole,
    pub student_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub class_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&&parsed, role);
        }
    }

    #[test]
    fn test_invalid_role() {
        assert!("principal".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_groups() {
        assert!(UserRole::staff_roles().contains(&&UserRole::Teacher));
        assert!(UserRole::staff_roles().contains(&&UserRole::Staff));
        assert!(!UserRole::student_roles().contains(&&UserRole::Teacher));
        assert!(UserRole::student_roles().contains(&&UserRole::Parent));
    }
}
