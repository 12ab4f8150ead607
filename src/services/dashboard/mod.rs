pub mod admin;
pub mod parent;
pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

// 仪表盘上的最近成绩与公告条数
pub(crate) const RECENT_GRADES_LIMIT: u64 = 5;
pub(crate) const RECENT_ANNOUNCEMENTS_LIMIT: u64 = 5;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    pub async fn student_dashboard(
        &self,
        query: crate::models::dashboard::requests::StudentDashboardQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        student::student_dashboard(self, query, request).await
    }

    pub async fn teacher_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::teacher_dashboard(self, request).await
    }

    pub async fn parent_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::parent_dashboard(self, request).await
    }

    pub async fn admin_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        admin::admin_dashboard(self, request).await
    }
}
