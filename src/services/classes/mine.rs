use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn my_classes(
    service: &ClassService,
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

    match storage.list_staff_classes(staff_id).await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "My classes"))),
        Err(e) => {
            error!("Failed to list classes for staff {}: {}", staff_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list classes: {e}"),
                )),
            )
        }
    }
}
