use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AnnouncementService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, announcements::requests::CreateAnnouncementRequest};

pub async fn create_announcement(
    service: &AnnouncementService,
    announcement_data: CreateAnnouncementRequest,
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

    if announcement_data.title.trim().is_empty() || announcement_data.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Title and content cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .create_announcement(auth.user.id, announcement_data)
        .await
    {
        Ok(announcement) => {
            info!("Announcement {} published by user {}", announcement.id, auth.user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(announcement, "Announcement published")))
        }
        Err(e) => {
            error!("Failed to create announcement: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create announcement: {e}"),
                )),
            )
        }
    }
}
