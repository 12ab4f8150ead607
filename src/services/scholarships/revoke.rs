use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScholarshipService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn revoke(
    service: &ScholarshipService,
    scholarship_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_scholarship(scholarship_id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Scholarship revoked")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScholarshipNotFound,
            "Scholarship not found",
        ))),
        Err(e) => {
            error!("Failed to revoke scholarship {}: {}", scholarship_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to revoke scholarship: {e}"),
                )),
            )
        }
    }
}
