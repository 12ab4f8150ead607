use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_name, validate_password_simple, validate_pesel,
};

pub async fn handle_register(
    service: &AuthService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 公开注册只允许学生、家长、教师
    if !matches!(
        user_data.role,
        UserRole::Student | UserRole::Parent | UserRole::Teacher
    ) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Role must be one of: student, parent, teacher",
        )));
    }

    // 验证姓名
    if let Err(msg) = validate_name(&user_data.first_name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }
    if let Err(msg) = validate_name(&user_data.last_name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    // 验证邮箱
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 验证 PESEL
    if let Err(msg) = validate_pesel(&user_data.pesel) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPeselInvalid, msg)));
    }

    // 验证密码强度
    if let Err(msg) = validate_password_simple(&user_data.password) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    let password_hash = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };
    user_data.password.clear();

    let storage = service.get_storage(request);

    match storage.create_user_with_role(user_data, password_hash).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(
            UserResponse { user },
            "Registration successful",
        ))),
        Err(e) => {
            if e.is_unique_violation() {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserAlreadyExists,
                    "Email or PESEL already exists",
                )));
            }
            let msg = format!("Registration failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::UserCreationFailed, msg)))
        }
    }
}
