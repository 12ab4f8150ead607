use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_lesson(
    service: &LessonService,
    lesson_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_lesson(lesson_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Lesson deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => {
            error!("Failed to delete lesson {}: {}", lesson_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete lesson: {e}"),
                )),
            )
        }
    }
}
