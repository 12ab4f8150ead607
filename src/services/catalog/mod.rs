//! 基础目录服务（科目、教师、教室）
//!
//! 管理端创建课程/课次时用来选取外键 id 的查表接口。

pub mod rooms;
pub mod subjects;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
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

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request).await
    }

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teachers::list_teachers(self, request).await
    }

    pub async fn list_rooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        rooms::list_rooms(self, request).await
    }
}
