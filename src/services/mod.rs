pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod catalog;
pub mod classes;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod lessons;
pub mod scholarships;
pub mod system;
pub mod users;

pub use announcements::AnnouncementService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use lessons::LessonService;
pub use scholarships::ScholarshipService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::users::entities::{AuthenticatedUser, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 学生侧代查解析结果：(student_id, class_id)
pub(crate) type StudentScope = (i64, Option<i64>);

/// 解析学生作用域。
///
/// 学生本人：取自身档案，缺失返回 404；
/// 家长：必须给出 student_id 且与孩子关联，否则 400 / 403。
pub(crate) async fn resolve_student_scope(
    auth: &AuthenticatedUser,
    requested_student_id: Option<i64>,
    storage: &Arc<dyn Storage>,
) -> Result<StudentScope, HttpResponse> {
    match auth.role {
        UserRole::Student => match auth.student_id {
            Some(student_id) => Ok((student_id, auth.class_id)),
            None => Err(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::StudentNotFound,
                "Student profile not found for this account",
            ))),
        },
        UserRole::Parent => {
            let Some(parent_id) = auth.parent_id else {
                return Err(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                    ErrorCode::NotFound,
                    "Parent profile not found for this account",
                )));
            };

            let Some(student_id) = requested_student_id else {
                return Err(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                    ErrorCode::BadRequest,
                    "student_id query parameter is required for parents",
                )));
            };

            match storage.list_children(parent_id).await {
                Ok(children) => match children.iter().find(|c| c.student_id == student_id) {
                    Some(child) => Ok((child.student_id, child.class_id)),
                    None => Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                        ErrorCode::Forbidden,
                        "Not authorized to view this student",
                    ))),
                },
                Err(e) => Err(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to resolve student: {e}"),
                    ),
                )),
            }
        }
        _ => Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        ))),
    }
}
