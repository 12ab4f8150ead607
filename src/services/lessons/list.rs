use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_lessons().await {
        Ok(lessons) => Ok(HttpResponse::Ok().json(ApiResponse::success(lessons, "Lesson list"))),
        Err(e) => {
            error!("Failed to list lessons: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list lessons: {e}"),
                )),
            )
        }
    }
}
