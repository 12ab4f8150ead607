use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_teachers(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers().await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(teachers, "Teacher list"))),
        Err(e) => {
            error!("Failed to list teachers: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list teachers: {e}"),
                )),
            )
        }
    }
}
