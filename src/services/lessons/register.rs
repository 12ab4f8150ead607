use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::LessonService;
use crate::models::lessons::entities::AttendanceStatus;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::SaveRegisterRequest};

pub async fn get_register(
    service: &LessonService,
    lesson_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_lesson_register(lesson_id).await {
        Ok(Some(register)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(register, "Lesson register")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => {
            error!("Failed to get register for lesson {}: {}", lesson_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get register: {e}"),
                )),
            )
        }
    }
}

pub async fn save_register(
    service: &LessonService,
    lesson_id: i64,
    register_data: SaveRegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if register_data.entries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Register entries cannot be empty",
        )));
    }

    // 迟到必须有记录依据，成绩必须在 1.0 到 6.0 之间
    for entry in &register_data.entries {
        if let Some(grade) = entry.grade
            && !(1.0..=6.0).contains(&grade)
        {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Grade value must be between 1.0 and 6.0",
            )));
        }
        if entry.status != AttendanceStatus::Late && entry.late_reason_id.is_some() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "late_reason_id is only valid for late status",
            )));
        }
    }

    let storage = service.get_storage(request);

    match storage
        .save_lesson_register(lesson_id, register_data.entries)
        .await
    {
        Ok(true) => {
            info!("Register saved for lesson {}", lesson_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Register saved")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => {
            error!("Failed to save register for lesson {}: {}", lesson_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to save register: {e}"),
                )),
            )
        }
    }
}
