use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{DashboardService, RECENT_GRADES_LIMIT};
use crate::middlewares::RequireJWT;
use crate::models::dashboard::responses::{ChildSummary, ParentDashboard};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::schedule::{attendance_percentage, school_year_start};

const RECENT_ANNOUNCEMENTS_LIMIT: u64 = 3;

pub async fn parent_dashboard(
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

    let Some(parent_id) = auth.parent_id else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            "Parent profile not found for this account",
        )));
    };

    let storage = service.get_storage(request);
    let now = chrono::Utc::now();
    let year_start = school_year_start(now).timestamp();

    let result: crate::errors::Result<ParentDashboard> = async {
        let mut children = Vec::new();
        for child in storage.list_children(parent_id).await? {
            let attendance = match child.class_id {
                Some(class_id) => {
                    let (conducted, absences) = storage
                        .attendance_counts(class_id, child.student_id, year_start, now.timestamp())
                        .await?;
                    attendance_percentage(conducted, absences) as i32
                }
                None => 100,
            };

            let recent_grades = storage
                .list_student_grades(
                    child.student_id,
                    Some(year_start),
                    Some(RECENT_GRADES_LIMIT),
                )
                .await?;

            children.push(ChildSummary {
                student_id: child.student_id,
                full_name: child.full_name,
                class_name: child.class_name,
                attendance_percentage: attendance,
                recent_grades,
            });
        }

        let announcements = storage
            .list_announcements(None, RECENT_ANNOUNCEMENTS_LIMIT)
            .await?;

        Ok(ParentDashboard {
            children,
            announcements,
        })
    }
    .await;

    match result {
        Ok(dashboard) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard, "Parent dashboard")))
        }
        Err(e) => {
            error!("Failed to build dashboard for parent {}: {}", parent_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build dashboard: {e}"),
                )),
            )
        }
    }
}
