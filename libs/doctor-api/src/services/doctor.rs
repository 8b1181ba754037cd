use std::sync::Arc;

use tracing::debug;

use shared_http::ApiClient;
use shared_models::error::ApiError;

use crate::models::Doctor;

pub struct DoctorService {
    api: Arc<ApiClient>,
}

impl DoctorService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All registered providers.
    pub async fn list(&self) -> Result<Vec<Doctor>, ApiError> {
        debug!("Fetching provider directory");
        self.api.get("/provider/").await
    }

    /// A single provider profile.
    pub async fn get(&self, id: i64) -> Result<Doctor, ApiError> {
        debug!("Fetching provider {}", id);
        self.api.get(&format!("/provider/{}/", id)).await
    }
}
