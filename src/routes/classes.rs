use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{ClassInfoQuery, CreateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ClassService 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

pub async fn list_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(class_data.into_inner(), &req)
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(class_id.0, &req).await
}

pub async fn my_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.my_classes(&req).await
}

pub async fn class_detail(req: HttpRequest, class_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.class_detail(class_id.0, &req).await
}

pub async fn class_info(
    req: HttpRequest,
    query: web::Query<ClassInfoQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.class_info(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 班级目录与建班 - 仅管理员
                    .route(
                        web::get()
                            .to(list_classes)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 教职工自己的班级（任教或班主任）
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_classes)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            // 学生/家长查看本班信息（班主任、班级公告）
            .service(
                web::resource("/info").route(
                    web::get()
                        .to(class_info)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    // 班级详情 - 教职工
                    .route(
                        web::get()
                            .to(class_detail)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    // 删班 - 仅管理员
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_class_info_route_requires_authentication() {
        let app =
            test::init_service(App::new().configure(configure_classes_routes)).await;

        let request = test::TestRequest::get()
            .uri("/api/v1/classes/info")
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
