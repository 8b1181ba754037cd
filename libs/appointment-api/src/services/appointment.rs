use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_http::ApiClient;
use shared_models::error::ApiError;

use crate::models::{Appointment, AppointmentListItem, AppointmentPayload, AppointmentStatus};

pub struct AppointmentService {
    api: Arc<ApiClient>,
}

impl AppointmentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Book an appointment; the backend echoes the accepted payload.
    pub async fn schedule(
        &self,
        payload: &AppointmentPayload,
    ) -> Result<AppointmentPayload, ApiError> {
        debug!("Scheduling appointment with provider {}", payload.provider);
        self.api
            .post("/appointment/", serde_json::to_value(payload)?)
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Appointment, ApiError> {
        debug!("Fetching appointment {}", id);
        self.api.get(&format!("/appointment/{}/", id)).await
    }

    pub async fn provider_appointments(
        &self,
        provider_id: Uuid,
    ) -> Result<Vec<AppointmentListItem>, ApiError> {
        debug!("Fetching appointments for provider {}", provider_id);
        self.api
            .get_with_query(
                "/appointment/",
                &[("provider".to_string(), provider_id.to_string())],
            )
            .await
    }

    pub async fn patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<AppointmentListItem>, ApiError> {
        debug!("Fetching appointments for patient {}", patient_id);
        self.api
            .get_with_query(
                "/appointment/",
                &[("patient".to_string(), patient_id.to_string())],
            )
            .await
    }

    /// Move an appointment through its lifecycle (confirm, cancel, complete).
    pub async fn set_status(&self, id: i64, status: AppointmentStatus) -> Result<(), ApiError> {
        debug!("Setting appointment {} status to {}", id, status);
        self.api
            .post_unit(
                &format!("/appointment/{}/set-status/", id),
                json!({ "status": status }),
            )
            .await
    }
}
