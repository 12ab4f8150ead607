use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CatalogService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_rooms(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_rooms().await {
        Ok(rooms) => Ok(HttpResponse::Ok().json(ApiResponse::success(rooms, "Room list"))),
        Err(e) => {
            error!("Failed to list rooms: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list rooms: {e}"),
                )),
            )
        }
    }
}
