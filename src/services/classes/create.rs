use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};

pub async fn create_class(
    service: &ClassService,
    class_data: CreateClassRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if class_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Class name cannot be empty",
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_class(class_data).await {
        Ok(class) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created")))
        }
        Err(e) => {
            if e.is_unique_violation() {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::Conflict,
                    "Class name already exists",
                )));
            }
            error!("Failed to create class: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create class: {e}"),
                )),
            )
        }
    }
}
