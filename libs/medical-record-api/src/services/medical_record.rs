use std::sync::Arc;

use tracing::debug;

use shared_http::ApiClient;
use shared_models::error::ApiError;

use crate::models::{CreateMedicalRecordRequest, MedicalRecord, UpdateMedicalRecordRequest};

pub struct MedicalRecordService {
    api: Arc<ApiClient>,
}

impl MedicalRecordService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The record attached to an appointment. The endpoint filters to a list
    /// even though the mapping is one-to-one.
    pub async fn by_appointment(
        &self,
        appointment_id: i64,
    ) -> Result<Option<MedicalRecord>, ApiError> {
        debug!("Fetching medical record for appointment {}", appointment_id);
        let records: Vec<MedicalRecord> = self
            .api
            .get_with_query(
                "/medical-record/",
                &[("appointment".to_string(), appointment_id.to_string())],
            )
            .await?;
        Ok(records.into_iter().next())
    }

    pub async fn create(
        &self,
        request: &CreateMedicalRecordRequest,
    ) -> Result<MedicalRecord, ApiError> {
        debug!("Creating medical record for patient {}", request.patient);
        self.api
            .post("/medical-record/", serde_json::to_value(request)?)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateMedicalRecordRequest,
    ) -> Result<MedicalRecord, ApiError> {
        debug!("Updating medical record {}", id);
        self.api
            .patch(&format!("/medical-record/{}/", id), serde_json::to_value(request)?)
            .await
    }
}
