use std::sync::Arc;

use tracing::debug;

use shared_http::ApiClient;
use shared_models::auth::DetailResponse;
use shared_models::error::ApiError;

use crate::models::{Patient, PatientOnboardRequest, UpdatePatientRequest};

pub struct PatientService {
    api: Arc<ApiClient>,
}

impl PatientService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Turn the authenticated account into a patient profile.
    pub async fn onboard(&self, request: &PatientOnboardRequest) -> Result<DetailResponse, ApiError> {
        debug!("Onboarding patient profile");
        self.api
            .post("/patient/onboard/", serde_json::to_value(request)?)
            .await
    }

    /// The caller's own patient profile. The detail route resolves to the
    /// authenticated account regardless of the path segment.
    pub async fn my_profile(&self) -> Result<Patient, ApiError> {
        debug!("Fetching own patient profile");
        self.api.get("/patient/me/").await
    }

    pub async fn update_profile(&self, request: &UpdatePatientRequest) -> Result<Patient, ApiError> {
        debug!("Updating own patient profile");
        self.api
            .patch("/patient/me/", serde_json::to_value(request)?)
            .await
    }
}
