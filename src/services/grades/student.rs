use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn student_grades(
    service: &GradeService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_student_grades(student_id, None, None).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(grades, "Student grades"))),
        Err(e) => {
            error!("Failed to list grades for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list grades: {e}"),
                )),
            )
        }
    }
}
