//! Workspace-level flow tests: every service wired over one shared client
//! against a single mock backend, exercising the paths a real session takes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wiremock::MockServer;

use appointment_api::{AppointmentService, SlotService};
use auth_api::AuthService;
use doctor_api::DoctorService;
use medical_record_api::MedicalRecordService;
use patient_api::PatientService;
use shared_config::ApiConfig;
use shared_http::{ApiClient, MemoryCredentialStore};
use speciality_api::SpecialityService;

/// One client, all services, one mock backend.
pub struct TestApi {
    pub server: MockServer,
    pub store: Arc<MemoryCredentialStore>,
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub doctors: DoctorService,
    pub specialities: SpecialityService,
    pub appointments: AppointmentService,
    pub slots: SlotService,
    pub patients: PatientService,
    pub medical_records: MedicalRecordService,
    session_expirations: Arc<AtomicUsize>,
}

impl TestApi {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryCredentialStore::new());
        let session_expirations = Arc::new(AtomicUsize::new(0));

        let config = ApiConfig::with_base_url(server.uri());
        let expirations = session_expirations.clone();
        let api = Arc::new(
            ApiClient::new(&config, store.clone())
                .expect("client should build")
                .with_session_expired_handler(move || {
                    expirations.fetch_add(1, Ordering::SeqCst);
                }),
        );

        Self {
            server,
            store,
            auth: AuthService::new(api.clone()),
            doctors: DoctorService::new(api.clone()),
            specialities: SpecialityService::new(api.clone()),
            appointments: AppointmentService::new(api.clone()),
            slots: SlotService::new(api.clone()),
            patients: PatientService::new(api.clone()),
            medical_records: MedicalRecordService::new(api.clone()),
            api,
            session_expirations,
        }
    }

    /// How many times the session-expired hook has fired.
    pub fn session_expirations(&self) -> usize {
        self.session_expirations.load(Ordering::SeqCst)
    }
}
