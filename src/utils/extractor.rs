//! 路径参数安全提取器
//!
//! 将路径中的 {id} 解析为 i64，解析失败时返回统一的 400 响应，
//! 避免在每个处理程序里重复校验。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径 {id} 的 i64 提取器
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|id| *id > 0);

        ready(match parsed {
            Some(id) => Ok(SafeIDI64(id)),
            None => {
                let response = actix_web::HttpResponse::BadRequest().json(
                    ApiResponse::error_empty(ErrorCode::BadRequest, "Invalid ID in path"),
                );
                Err(InternalError::from_response("Invalid ID in path", response).into())
            }
        })
    }
}
