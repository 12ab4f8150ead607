use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, courses::requests::StudentCoursesQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::school_year_start;

pub async fn course_overview(
    service: &CourseService,
    course_id: i64,
    query: StudentCoursesQuery,
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

    let (student_id, _class_id) =
        match resolve_student_scope(&auth, query.student_id, &storage).await {
            Ok(scope) => scope,
            Err(response) => return Ok(response),
        };

    let year_start = school_year_start(chrono::Utc::now()).timestamp();

    match storage
        .get_course_overview(course_id, student_id, year_start)
        .await
    {
        Ok(Some(overview)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(overview, "Course overview")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            error!("Failed to get course {} overview: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get course overview: {e}"),
                )),
            )
        }
    }
}
