use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::schedule::school_year_start;

pub async fn teaching_schedule(
    service: &LessonService,
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

    let staff_id = match auth.staff_id {
        Some(staff_id) => staff_id,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "No staff profile for this account",
            )));
        }
    };

    let storage = service.get_storage(request);
    let from = school_year_start(chrono::Utc::now()).timestamp();

    match storage.list_teaching_schedule(staff_id, from).await {
        Ok(entries) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "Teaching schedule")))
        }
        Err(e) => {
            error!(
                "Failed to get teaching schedule for staff {}: {}",
                staff_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get teaching schedule: {e}"),
                )),
            )
        }
    }
}
