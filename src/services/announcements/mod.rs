pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::announcements::requests::CreateAnnouncementRequest;
use crate::storage::Storage;

// 列表端点返回的最新公告条数
pub(crate) const ANNOUNCEMENT_LIMIT: u64 = 10;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
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

    // 最新公告，置顶在前
    pub async fn list_announcements(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_announcements(self, request).await
    }

    pub async fn create_announcement(
        &self,
        announcement_data: CreateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, announcement_data, request).await
    }
}
