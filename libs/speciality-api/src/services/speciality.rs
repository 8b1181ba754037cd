use std::sync::Arc;

use tracing::debug;

use shared_http::ApiClient;
use shared_models::error::ApiError;

use crate::models::Speciality;

pub struct SpecialityService {
    api: Arc<ApiClient>,
}

impl SpecialityService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Speciality>, ApiError> {
        debug!("Fetching specialities");
        self.api.get("/speciality/").await
    }
}
