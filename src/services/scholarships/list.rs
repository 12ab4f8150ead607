use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScholarshipService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_scholarships(
    service: &ScholarshipService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_scholarships().await {
        Ok(grants) => Ok(HttpResponse::Ok().json(ApiResponse::success(grants, "Scholarship list"))),
        Err(e) => {
            error!("Failed to list scholarships: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list scholarships: {e}"),
                )),
            )
        }
    }
}
