use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::dashboard::requests::StudentDashboardQuery;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn student_dashboard(
    req: HttpRequest,
    query: web::Query<StudentDashboardQuery>,
) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE
        .student_dashboard(query.into_inner(), &req)
        .await
}

pub async fn teacher_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.teacher_dashboard(&req).await
}

pub async fn parent_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.parent_dashboard(&req).await
}

pub async fn admin_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.admin_dashboard(&req).await
}

// 配置路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .service(
                // 学生本人或家长代查
                web::resource("/student").route(
                    web::get()
                        .to(student_dashboard)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/teacher").route(
                    web::get()
                        .to(teacher_dashboard)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/parent").route(
                    web::get()
                        .to(parent_dashboard)
                        .wrap(middlewares::RequireRole::new(&UserRole::Parent)),
                ),
            )
            .service(
                web::resource("/admin").route(
                    web::get()
                        .to(admin_dashboard)
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
    async fn test_dashboard_routes_require_authentication() {
        let app =
            test::init_service(App::new().configure(configure_dashboard_routes)).await;

        for path in [
            "/api/v1/dashboard/student",
            "/api/v1/dashboard/teacher",
            "/api/v1/dashboard/parent",
            "/api/v1/dashboard/admin",
        ] {
            let request = test::TestRequest::get().uri(path).to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        }
    }
}
