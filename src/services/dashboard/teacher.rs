use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DashboardService;
use crate::middlewares::RequireJWT;
use crate::models::dashboard::responses::TeacherDashboard;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::schedule::school_year_start;

// 仪表盘上展示的最近课次与公告条数
const RECENT_LESSONS_LIMIT: usize = 3;
const RECENT_ANNOUNCEMENTS_LIMIT: u64 = 3;

pub async fn teacher_dashboard(
    service: &DashboardService,
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

    let Some(staff_id) = auth.staff_id else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "No staff profile for this account",
        )));
    };

    let storage = service.get_storage(request);
    let now = chrono::Utc::now();
    let year_start = school_year_start(now).timestamp();

    let result: crate::errors::Result<TeacherDashboard> = async {
        let next_lesson = storage
            .next_teaching_lesson(staff_id, now.timestamp())
            .await?;

        // 已上过的课，最近的在前
        let schedule = storage.list_teaching_schedule(staff_id, year_start).await?;
        let recent_lessons = schedule
            .into_iter()
            .filter(|entry| entry.start_time <= now)
            .rev()
            .take(RECENT_LESSONS_LIMIT)
            .collect();

        let classes = storage.list_staff_classes(staff_id).await?;

        let announcements = storage
            .list_announcements(None, RECENT_ANNOUNCEMENTS_LIMIT)
            .await?;

        Ok(TeacherDashboard {
            next_lesson,
            recent_lessons,
            classes,
            announcements,
        })
    }
    .await;

    match result {
        Ok(dashboard) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Teacher dashboard")))
        }
        Err(e) => {
            error!("Failed to build dashboard for staff {}: {}", staff_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build dashboard: {e}"),
                )),
            )
        }
    }
}
