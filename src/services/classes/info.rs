use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassService;
use crate::middlewares::RequireJWT;
use crate::models::classes::responses::StudentClassInfo;
use crate::models::{ApiResponse, ErrorCode, classes::requests::ClassInfoQuery};
use crate::services::resolve_student_scope;

pub async fn class_info(
    service: &ClassService,
    query: ClassInfoQuery,
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

    // 未分班学生返回空信息而非报错
    let Some(class_id) = class_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentClassInfo::unassigned(),
            "Class info",
        )));
    };

    match storage.get_student_class_info(class_id).await {
        Ok(Some(info)) => Ok(HttpResponse::Ok().json(ApiResponse::success(info, "Class info"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => {
            error!(
                "Failed to get class info for student {}: {}",
                student_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get class info: {e}"),
                )),
            )
        }
    }
}
