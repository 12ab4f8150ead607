use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ScholarshipService;
use crate::middlewares::RequireJWT;
use crate::models::scholarships::responses::MyScholarshipsResponse;
use crate::models::{ApiResponse, ErrorCode, scholarships::requests::MyScholarshipsQuery};
use crate::services::resolve_student_scope;

pub async fn my_scholarships(
    service: &ScholarshipService,
    query: MyScholarshipsQuery,
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

    let active = match storage.list_student_scholarships(student_id).await {
        Ok(active) => active,
        Err(e) => {
            error!(
                "Failed to list scholarships for student {}: {}",
                student_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list scholarships: {e}"),
                )),
            );
        }
    };

    let types = match storage.list_scholarship_types().await {
        Ok(types) => types,
        Err(e) => {
            error!("Failed to list scholarship types: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list scholarship types: {e}"),
                )),
            );
        }
    };

    let available = available_types(types, &active);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MyScholarshipsResponse { active, available },
        "My scholarships",
    )))
}

// 可申请 = 未持有的类型，按类型 id 比较
fn available_types(
    types: Vec<crate::models::scholarships::entities::ScholarshipType>,
    active: &[crate::models::scholarships::responses::ActiveScholarship],
) -> Vec<crate::models::scholarships::entities::ScholarshipType> {
    types
        .into_iter()
        .filter(|t| !active.iter().any(|a| a.type_id == t.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::available_types;
    use crate::models::scholarships::entities::ScholarshipType;
    use crate::models::scholarships::responses::ActiveScholarship;

    fn ty(id: i64, name: &str) -> ScholarshipType {
        ScholarshipType {
            id,
            name: name.to_string(),
            duration_semesters: 2,
        }
    }

    fn held(type_id: i64, type_name: &str) -> ActiveScholarship {
        ActiveScholarship {
            id: 1,
            type_id,
            type_name: type_name.to_string(),
            amount: 1000.0,
            start_date: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_held_type_is_not_available() {
        let available = available_types(vec![ty(1, "Sports"), ty(2, "Science")], &[held(1, "Sports")]);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, 2);
    }

    #[test]
    fn test_same_name_types_are_distinguished_by_id() {
        // 名称不唯一，持有其中一个不能遮蔽同名的另一个类型
        let available = available_types(vec![ty(1, "Merit"), ty(2, "Merit")], &[held(1, "Merit")]);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, 2);
    }

    #[test]
    fn test_nothing_held_keeps_all_types() {
        let available = available_types(vec![ty(1, "Sports"), ty(2, "Science")], &[]);
        assert_eq!(available.len(), 2);
    }
}
