use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::CreateGradeRequest};

pub async fn create_grade(
    service: &GradeService,
    grade_data: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !(1.0..=6.0).contains(&grade_data.value) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade value must be between 1.0 and 6.0",
        )));
    }
    if grade_data.weight <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade weight must be positive",
        )));
    }

    let storage = service.get_storage(request);

    // 课程直接给出，或从课次解析
    let course_id = match (grade_data.course_id, grade_data.lesson_id) {
        (Some(course_id), _) => course_id,
        (None, Some(lesson_id)) => match storage.get_lesson_by_id(lesson_id).await {
            Ok(Some(lesson)) => lesson.course_id,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::LessonNotFound,
                    "Lesson not found",
                )));
            }
            Err(e) => {
                error!("Failed to resolve lesson {}: {}", lesson_id, e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to resolve lesson: {e}"),
                    ),
                ));
            }
        },
        (None, None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Either course_id or lesson_id is required",
            )));
        }
    };

    match storage.create_grade(course_id, grade_data).await {
        Ok(grade) => Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created"))),
        Err(e) => {
            error!("Failed to create grade: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create grade: {e}"),
                )),
            )
        }
    }
}
