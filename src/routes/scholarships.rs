use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::scholarships::requests::{
    ApplyScholarshipRequest, GrantScholarshipRequest, MyScholarshipsQuery,
};
use crate::models::users::entities::UserRole;
use crate::services::ScholarshipService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ScholarshipService 实例
static SCHOLARSHIP_SERVICE: Lazy<ScholarshipService> = Lazy::new(ScholarshipService::new_lazy);

pub async fn scholarship_types(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE.scholarship_types(&req).await
}

pub async fn my_scholarships(
    req: HttpRequest,
    query: web::Query<MyScholarshipsQuery>,
) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE
        .my_scholarships(query.into_inner(), &req)
        .await
}

pub async fn apply(
    req: HttpRequest,
    apply_data: web::Json<ApplyScholarshipRequest>,
) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE.apply(apply_data.into_inner(), &req).await
}

pub async fn list_scholarships(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE.list_scholarships(&req).await
}

pub async fn grant(
    req: HttpRequest,
    grant_data: web::Json<GrantScholarshipRequest>,
) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE.grant(grant_data.into_inner(), &req).await
}

pub async fn revoke(req: HttpRequest, scholarship_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHOLARSHIP_SERVICE.revoke(scholarship_id.0, &req).await
}

// 配置路由
pub fn configure_scholarships_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/scholarships")
            .wrap(middlewares::RequireJWT)
            // 类型目录 - 所有登录用户可见
            .service(web::resource("/types").route(web::get().to(scholarship_types)))
            // 学生本人或家长代查
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_scholarships)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            // 自助申请 - 仅学生本人（业务层再次校验）
            .service(
                web::resource("/apply").route(
                    web::post()
                        .to(apply)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("")
                    // 发放记录与发放 - 仅管理员
                    .route(
                        web::get()
                            .to(list_scholarships)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(grant)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}").route(
                    web::delete()
                        .to(revoke)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            ),
    );
}
