use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::{ApiResponse, ErrorCode, users::requests::AssignClassRequest};

pub async fn assign_class(
    service: &UserService,
    user_id: i64,
    assign: AssignClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.assign_student_class(user_id, assign.class_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Student assigned to class")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Student profile or class not found",
        ))),
        Err(e) => {
            error!("Failed to assign class for user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to assign class: {e}"),
                )),
            )
        }
    }
}
