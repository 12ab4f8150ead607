use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{ANNOUNCEMENT_LIMIT, AnnouncementService};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let auth = match RequireJWT::extract_authenticated_user(request) {
        Some(auth) => auth,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let storage = service.get_storage(request);

    // 学生只看本班和全校公告，其他角色看全部
    match storage
        .list_announcements(auth.class_id, ANNOUNCEMENT_LIMIT)
        .await
    {
        Ok(announcements) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(announcements, "Announcements")))
        }
        Err(e) => {
            error!("Failed to list announcements: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list announcements: {e}"),
                )),
            )
        }
    }
}
