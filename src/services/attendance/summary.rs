use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::lessons::responses::AttendanceSummary;
use crate::models::{ApiResponse, ErrorCode, lessons::requests::ScheduleQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::{attendance_percentage, school_year_start};

pub async fn attendance_summary(
    service: &AttendanceService,
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

    // 未分班学生没有已进行的课次
    let Some(class_id) = class_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSummary {
                conducted_lessons: 0,
                absences: 0,
                percentage: 100,
            },
            "Attendance summary",
        )));
    };

    let now = chrono::Utc::now();
    let from = school_year_start(now).timestamp();

    match storage
        .attendance_counts(class_id, student_id, from, now.timestamp())
        .await
    {
        Ok((conducted, absences)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSummary {
                conducted_lessons: conducted,
                absences,
                percentage: attendance_percentage(conducted, absences),
            },
            "Attendance summary",
        ))),
        Err(e) => {
            error!(
                "Failed to get attendance summary for student {}: {}",
                student_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get attendance summary: {e}"),
                )),
            )
        }
    }
}
