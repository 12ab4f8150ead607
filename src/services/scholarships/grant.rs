use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScholarshipService;
use crate::errors::SchoolSystemError;
use crate::models::{ApiResponse, ErrorCode, scholarships::requests::GrantScholarshipRequest};

pub async fn grant(
    service: &ScholarshipService,
    grant_data: GrantScholarshipRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if grant_data.amount <= 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Scholarship amount must be positive",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_scholarship_type(grant_data.scholarship_type_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScholarshipNotFound,
                "Scholarship type not found",
            )));
        }
        Err(e) => {
            error!("Failed to get scholarship type: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get scholarship type: {e}"),
                )),
            );
        }
    }

    let start_date = grant_data
        .start_date
        .map(|d| d.timestamp())
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    match storage
        .create_scholarship(
            grant_data.student_id,
            grant_data.scholarship_type_id,
            grant_data.amount,
            start_date,
        )
        .await
    {
        Ok(scholarship) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(scholarship, "Scholarship granted"))),
        Err(SchoolSystemError::Conflict(_)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::ScholarshipAlreadyGranted,
                "Scholarship of this type already granted",
            )))
        }
        Err(e) => {
            if e.is_unique_violation() {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::ScholarshipAlreadyGranted,
                    "Scholarship of this type already granted",
                )));
            }
            error!("Failed to grant scholarship: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to grant scholarship: {e}"),
                )),
            )
        }
    }
}
