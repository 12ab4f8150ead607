use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode, grades::requests::UpdateGradeRequest};

pub async fn update_grade(
    service: &GradeService,
    grade_id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(value) = update.value
        && !(1.0..=6.0).contains(&value)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade value must be between 1.0 and 6.0",
        )));
    }
    if let Some(weight) = update.weight
        && weight <= 0.0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade weight must be positive",
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_grade(grade_id, update).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => {
            error!("Failed to update grade {}: {}", grade_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update grade: {e}"),
                )),
            )
        }
    }
}
