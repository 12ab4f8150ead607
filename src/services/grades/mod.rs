pub mod create;
pub mod delete;
pub mod mine;
pub mod student;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::grades::requests::{CreateGradeRequest, MyGradesQuery, UpdateGradeRequest};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 学生本人或家长查看孩子的本学年成绩
    pub async fn my_grades(
        &self,
        query: MyGradesQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mine::my_grades(self, query, request).await
    }

    // 管理员/教师按学生查成绩
    pub async fn student_grades(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::student_grades(self, student_id, request).await
    }

    pub async fn create_grade(
        &self,
        grade_data: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, grade_data, request).await
    }

    pub async fn update_grade(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, grade_id, update, request).await
    }

    pub async fn delete_grade(
        &self,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, grade_id, request).await
    }
}
