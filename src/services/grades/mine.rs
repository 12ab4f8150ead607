use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::GradeService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, grades::requests::MyGradesQuery};
use crate::services::resolve_student_scope;
use crate::utils::schedule::school_year_start;

pub async fn my_grades(
    service: &GradeService,
    query: MyGradesQuery,
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

    let since = school_year_start(chrono::Utc::now()).timestamp();

    match storage
        .list_student_grades(student_id, Some(since), None)
        .await
    {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(grades, "My grades"))),
        Err(e) => {
            error!("Failed to list grades for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list grades: {e}"),
                )),
            )
        }
    }
}
