use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::courses::responses::StudentCourse;
use crate::models::{ApiResponse, ErrorCode, courses::requests::StudentCoursesQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::school_year_start;

pub async fn my_courses(
    service: &CourseService,
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

    let (student_id, class_id) =
        match resolve_student_scope(&auth, query.student_id, &storage).await {
            Ok(scope) => scope,
            Err(response) => return Ok(response),
        };

    // 未分班学生没有课程
    let Some(class_id) = class_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<StudentCourse>::new(),
            "My courses",
        )));
    };

    let year_start = school_year_start(chrono::Utc::now()).timestamp();

    match storage
        .list_student_courses(student_id, class_id, year_start)
        .await
    {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(courses, "My courses"))),
        Err(e) => {
            error!("Failed to list courses for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list courses: {e}"),
                )),
            )
        }
    }
}
