use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{DashboardService, RECENT_ANNOUNCEMENTS_LIMIT, RECENT_GRADES_LIMIT};
use crate::middlewares::RequireJWT;
use crate::models::dashboard::responses::StudentDashboard;
use crate::models::{ApiResponse, ErrorCode, dashboard::requests::StudentDashboardQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::{attendance_percentage, school_year_start};

pub async fn student_dashboard(
    service: &DashboardService,
    query: StudentDashboardQuery,
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

    // 家长携带 student_id 代查孩子的仪表盘
    let (student_id, class_id) =
        match resolve_student_scope(&auth, query.student_id, &storage).await {
            Ok(scope) => scope,
            Err(response) => return Ok(response),
        };

    let now = chrono::Utc::now();
    let year_start = school_year_start(now).timestamp();

    let result: crate::errors::Result<StudentDashboard> = async {
        let next_lesson = match class_id {
            Some(class_id) => {
                storage
                    .next_class_lesson(class_id, now.timestamp())
                    .await?
            }
            None => None,
        };

        let recent_grades = storage
            .list_student_grades(student_id, Some(year_start), Some(RECENT_GRADES_LIMIT))
            .await?;

        let attendance = match class_id {
            Some(class_id) => {
                let (conducted, absences) = storage
                    .attendance_counts(class_id, student_id, year_start, now.timestamp())
                    .await?;
                attendance_percentage(conducted, absences) as i32
            }
            None => 100,
        };

        let announcements = storage
            .list_announcements(class_id, RECENT_ANNOUNCEMENTS_LIMIT)
            .await?;

        Ok(StudentDashboard {
            next_lesson,
            recent_grades,
            attendance_percentage: attendance,
            announcements,
        })
    }
    .await;

    match result {
        Ok(dashboard) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Student dashboard")))
        }
        Err(e) => {
            error!(
                "Failed to build dashboard for student {}: {}",
                student_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build dashboard: {e}"),
                )),
            )
        }
    }
}
