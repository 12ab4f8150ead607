pub mod create;
pub mod delete;
pub mod detail;
pub mod info;
pub mod list;
pub mod mine;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::requests::{ClassInfoQuery, CreateClassRequest};
use crate::storage::Storage;

pub struct ClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassService {
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

    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classes(self, request).await
    }

    pub async fn create_class(
        &self,
        class_data: CreateClassRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, class_data, request).await
    }

    pub async fn delete_class(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, class_id, request).await
    }

    // 教职工自己任教或担任班主任的班级
    pub async fn my_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        mine::my_classes(self, request).await
    }

    // 学生/家长视角的班级信息
    pub async fn class_info(
        &self,
        query: ClassInfoQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        info::class_info(self, query, request).await
    }

    pub async fn class_detail(
        &self,
        class_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        detail::class_detail(self, class_id, request).await
    }
}
