pub mod apply;
pub mod grant;
pub mod list;
pub mod mine;
pub mod revoke;
pub mod types;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::scholarships::requests::{
    ApplyScholarshipRequest, GrantScholarshipRequest, MyScholarshipsQuery,
};
use crate::storage::Storage;

// 学生自助申请的固定金额
pub(crate) const DEFAULT_SCHOLARSHIP_AMOUNT: f64 = 1000.0;

pub struct ScholarshipService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScholarshipService {
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

    pub async fn scholarship_types(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        types::scholarship_types(self, request).await
    }

    // 学生本人或家长查看孩子的奖学金
    pub async fn my_scholarships(
        &self,
        query: MyScholarshipsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mine::my_scholarships(self, query, request).await
    }

    // 学生自助申请，金额固定
    pub async fn apply(
        &self,
        apply_data: ApplyScholarshipRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        apply::apply(self, apply_data, request).await
    }

    pub async fn list_scholarships(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_scholarships(self, request).await
    }

    pub async fn grant(
        &self,
        grant_data: GrantScholarshipRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grant::grant(self, grant_data, request).await
    }

    pub async fn revoke(
        &self,
        scholarship_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        revoke::revoke(self, scholarship_id, request).await
    }
}
