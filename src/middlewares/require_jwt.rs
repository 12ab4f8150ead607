/*!
 * JWT 认证中间件
 *
 * 验证 access token 并解析完整的用户上下文（用户 + 推导角色 + 档案 ID），
 * 存入请求扩展供后续处理程序使用。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)
 *                 .route("/protected", web::get().to(protected_handler))
 *         )
 * })
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_authenticated_user(&req)` 取回上下文。
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件提取并验证 access token
 * 3. 加载用户并按 staff -> student -> parent 顺序推导角色
 * 4. 令牌无效或缺失返回 401；用户无任何角色档案返回 403
 */

use crate::models::ErrorCode;
use crate::models::users::entities::{AuthenticatedUser, UserRole};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Unauthorized(String),
    NoRole,
}

// 辅助函数：提取并验证 JWT access token，解析完整用户上下文
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<AuthenticatedUser, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            AuthFailure::Unauthorized("Missing or invalid Authorization header".to_string())
        })?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Unauthorized("Invalid JWT token".to_string())
    })?;

    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AuthFailure::Unauthorized("Invalid user ID in JWT".to_string()))?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| AuthFailure::Unauthorized("Failed to retrieve user from storage".to_string()))?
        .ok_or_else(|| AuthFailure::Unauthorized("User not found".to_string()))?;

    let profile = storage
        .get_role_profile(user_id)
        .await
        .map_err(|_| AuthFailure::Unauthorized("Failed to resolve user role".to_string()))?
        .ok_or(AuthFailure::NoRole)?;

    Ok(AuthenticatedUser {
        user,
        role: profile.role,
        student_id: profile.student_id,
        staff_id: profile.staff_id,
        parent_id: profile.parent_id,
        class_id: profile.class_id,
    })
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            // 验证 JWT token 并解析用户上下文
            match extract_and_validate_jwt(&req).await {
                Ok(authenticated) => {
                    debug!(
                        "JWT authentication successful for ID: {} (role: {})",
                        authenticated.user.id, authenticated.role
                    );
                    req.extensions_mut().insert(authenticated);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AuthFailure::NoRole) => {
                    info!(
                        "JWT authentication rejected for request to {}: no role assigned",
                        req.path()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::RoleNotAssigned,
                            "No role assigned to this account",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(AuthFailure::Unauthorized(err)) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取完整的认证上下文
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_authenticated_user(req: &actix_web::HttpRequest) -> Option<AuthenticatedUser> {
        req.extensions().get::<AuthenticatedUser>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions()
            .get::<AuthenticatedUser>()
            .map(|auth| auth.user.id)
    }

    /// 从请求扩展中提取推导角色
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<AuthenticatedUser>()
            .map(|auth| auth.role.clone())
    }
}
