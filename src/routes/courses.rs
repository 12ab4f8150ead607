use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CreateCourseRequest, StudentCoursesQuery};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeIDI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

pub async fn my_courses(
    req: HttpRequest,
    query: web::Query<StudentCoursesQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.my_courses(query.into_inner(), &req).await
}

pub async fn course_overview(
    req: HttpRequest,
    course_id: SafeIDI64,
    query: web::Query<StudentCoursesQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .course_overview(course_id.0, query.into_inner(), &req)
        .await
}

pub async fn course_students(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.course_students(course_id.0, &req).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 课程目录与开课 - 仅管理员
                    .route(
                        web::get()
                            .to(list_courses)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::post()
                            .to(create_course)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 学生本人或家长代查
            .service(
                web::resource("/mine").route(
                    web::get()
                        .to(my_courses)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            .service(
                web::resource("/{id}").route(
                    web::delete()
                        .to(delete_course)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{id}/overview").route(
                    web::get()
                        .to(course_overview)
                        .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                ),
            )
            // 选课学生名单 - 教师和管理员
            .service(
                web::resource("/{id}/students").route(
                    web::get()
                        .to(course_students)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            ),
    );
}
