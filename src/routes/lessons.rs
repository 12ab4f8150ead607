use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lessons::requests::{CreateLessonRequest, SaveRegisterRequest, ScheduleQuery};
use crate::models::users::entities::UserRole;
use crate::services::LessonService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LessonService 实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);

pub async fn list_lessons(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req).await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(lesson_data.into_inner(), &req)
        .await
}

pub async fn delete_lesson(req: HttpRequest, lesson_id: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(lesson_id.0, &req).await
}

pub async fn schedule(
    req: HttpRequest,
    query: web::Query<ScheduleQuery>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.schedule(query.into_inner(), &req).await
}

pub async fn teaching_schedule(req: HttpRequest) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.teaching_schedule(&req).await
}

pub async fn get_register(req: HttpRequest, lesson_id: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_register(lesson_id.0, &req).await
}

pub async fn save_register(
    req: HttpRequest,
    lesson_id: SafeIDI64,
    register_data: web::Json<SaveRegisterRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .save_register(lesson_id.0, register_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_lessons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 排课 - 仅管理员
                    .route(
                        web::get()
                            .to(list_lessons)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 学生/家长课表
            .service(
                web::resource("/schedule").route(
                    web::get()
                        .to(schedule)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            // 教师授课课表
            .service(
                web::resource("/teaching").route(
                    web::get()
                        .to(teaching_schedule)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    // 点名册 - 教师和管理员
                    .route(
                        web::get()
                            .to(get_register)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_lesson)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}/register").route(
                    web::post()
                        .to(save_register)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}
