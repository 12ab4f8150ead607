use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::errors::SchoolSystemError;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::CreateLessonRequest};

pub async fn create_lesson(
    service: &LessonService,
    lesson_data: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if lesson_data.duration_min <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Lesson duration must be positive",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_lesson(lesson_data).await {
        Ok(lesson) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "Lesson created")))
        }
        Err(SchoolSystemError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::LessonSlotTaken,
                "The class already has a lesson in this time slot",
            )))
        }
        Err(e) => {
            error!("Failed to create lesson: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create lesson: {e}"),
                )),
            )
        }
    }
}
