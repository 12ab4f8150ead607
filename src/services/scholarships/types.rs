use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScholarshipService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn scholarship_types(
    service: &ScholarshipService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_scholarship_types().await {
        Ok(types) => Ok(HttpResponse::Ok().json(ApiResponse::success(types, "Scholarship types"))),
        Err(e) => {
            error!("Failed to list scholarship types: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list scholarship types: {e}"),
                )),
            )
        }
    }
}
