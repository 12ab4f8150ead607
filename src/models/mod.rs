//! 数据模型定义
//!
//! 按领域划分的业务实体、请求与响应结构。

pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod classes;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod lessons;
pub mod scholarships;
pub mod system;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码，随统一响应结构返回
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    AuthFailed = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1005,
    InternalServerError = 1006,

    // 用户
    UserNotFound = 2000,
    UserAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPeselInvalid = 2004,
    UserCreationFailed = 2005,
    UserUpdateFailed = 2006,
    UserDeleteFailed = 2007,
    RoleNotAssigned = 2008,

    // 班级与课程
    ClassNotFound = 3000,
    CourseNotFound = 3100,

    // 课次
    LessonNotFound = 3200,
    LessonSlotTaken = 3201,

    // 成绩
    GradeNotFound = 3300,

    // 学生档案
    StudentNotFound = 3400,

    // 奖学金
    ScholarshipNotFound = 3500,
    ScholarshipAlreadyGranted = 3501,
}

/// 程序启动时间，用于健康检查的运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
