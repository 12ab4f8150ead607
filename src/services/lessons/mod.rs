pub mod create;
pub mod delete;
pub mod list;
pub mod register;
pub mod schedule;
pub mod teaching;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::{CreateLessonRequest, SaveRegisterRequest, ScheduleQuery};
use crate::storage::Storage;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_lessons(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request).await
    }

    pub async fn create_lesson(
        &self,
        lesson_data: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, lesson_data, request).await
    }

    pub async fn delete_lesson(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, lesson_id, request).await
    }

    // 学生/家长课表
    pub async fn schedule(
        &self,
        query: ScheduleQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        schedule::schedule(self, query, request).await
    }

    // 教师授课课表
    pub async fn teaching_schedule(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teaching::teaching_schedule(self, request).await
    }

    pub async fn get_register(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::get_register(self, lesson_id, request).await
    }

    pub async fn save_register(
        &self,
        lesson_id: i64,
        register_data: SaveRegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::save_register(self, lesson_id, register_data, request).await
    }
}
