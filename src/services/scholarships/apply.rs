use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{DEFAULT_SCHOLARSHIP_AMOUNT, ScholarshipService};
use crate::errors::SchoolSystemError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, scholarships::requests::ApplyScholarshipRequest};

pub async fn apply(
    service: &ScholarshipService,
    apply_data: ApplyScholarshipRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let auth = match RequireJWT::extract_authenticated_user(request) {
        Some(auth) => auth,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 只有学生本人可以申请
    if auth.role != UserRole::Student {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only students can apply for scholarships",
        )));
    }
    let Some(student_id) = auth.student_id else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student profile not found for this account",
        )));
    };

    let storage = service.get_storage(request);

    match storage
        .get_scholarship_type(apply_data.scholarship_type_id)
        .await
    {
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

    match storage
        .create_scholarship(
            student_id,
            apply_data.scholarship_type_id,
            DEFAULT_SCHOLARSHIP_AMOUNT,
            chrono::Utc::now().timestamp(),
        )
        .await
    {
        Ok(scholarship) => {
            info!(
                "Student {} granted scholarship type {}",
                student_id, apply_data.scholarship_type_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(scholarship, "Scholarship granted")))
        }
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
            error!("Failed to apply for scholarship: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to apply for scholarship: {e}"),
                )),
            )
        }
    }
}
