use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_subjects(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, "Subject list"))),
        Err(e) => {
            error!("Failed to list subjects: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list subjects: {e}"),
                )),
            )
        }
    }
}
