use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::LessonService;
use crate::middlewares::RequireJWT;
use crate::models::lessons::responses::ScheduleEntry;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::ScheduleQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::school_year_start;

pub async fn schedule(
    service: &LessonService,
    query: ScheduleQuery,
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

    let storage = service.get_storage(request);

    let (student_id, class_id) =
        match resolve_student_scope(&auth, query.student_id, &storage).await {
            Ok(scope) => scope,
            Err(response) => return Ok(response),
        };

    // 未分班学生没有课表
    let Some(class_id) = class_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<ScheduleEntry>::new(),
            "Schedule",
        )));
    };

    let from = school_year_start(chrono::Utc::now()).timestamp();

    match storage
        .list_class_schedule(class_id, student_id, from, query.future)
        .await
    {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "Schedule"))),
        Err(e) => {
            error!("Failed to get schedule for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get schedule: {e}"),
                )),
            )
        }
    }
}
