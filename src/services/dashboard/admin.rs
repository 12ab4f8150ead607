use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DashboardService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn admin_dashboard(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 今日区间 [00:00, 24:00) UTC
    let now = chrono::Utc::now();
    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .timestamp();
    let day_end = day_start + 86_400;

    match storage.admin_stats(day_start, day_end).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Admin dashboard"))),
        Err(e) => {
            error!("Failed to build admin dashboard: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build dashboard: {e}"),
                )),
            )
        }
    }
}
