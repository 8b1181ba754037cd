use assert_matches::assert_matches;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use appointment_api::{AppointmentPayload, AppointmentStatus, SlotStatus};
use auth_api::LoginRequest;
use booking_flow_tests::TestApi;
use medical_record_api::CreateMedicalRecordRequest;
use shared_http::CredentialStore;
use shared_models::error::ApiError;
use shared_utils::test_utils::{MockApiResponses, TestUser};

#[tokio::test]
async fn patient_books_and_provider_documents_a_visit() {
    let api = TestApi::start().await;
    let patient = TestUser::patient("pat@example.com");
    let provider = TestUser::provider("doc@example.com");

    // Login issues the credential pair.
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockApiResponses::login_response(&patient, "acc", "ref")),
        )
        .expect(1)
        .mount(&api.server)
        .await;
    let session = assert_ok!(
        api.auth
            .login(&LoginRequest {
                email: "pat@example.com".into(),
                password: "hunter2".into(),
            })
            .await
    );
    assert_eq!(session.user.id, patient.id);
    assert_eq!(api.store.access_token().as_deref(), Some("acc"));

    // Browse the directory with the fresh credential.
    Mock::given(method("GET"))
        .and(path("/speciality/"))
        .and(header("authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::speciality_response(1, "General Practice"),
        ])))
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/provider/"))
        .and(header("authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::doctor_response(3, &provider, "General Practice"),
        ])))
        .mount(&api.server)
        .await;

    let specialities = assert_ok!(api.specialities.list().await);
    let doctors = assert_ok!(api.doctors.list().await);
    assert_eq!(specialities[0].name, "General Practice");
    assert_eq!(doctors[0].id, 3);

    // Pick a free slot in the provider's week.
    Mock::given(method("GET"))
        .and(path("/slot/range/"))
        .and(query_param("provider", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "2025-06-02": [MockApiResponses::slot_response(
                10, "2025-06-02T09:00:00Z", "2025-06-02T09:30:00Z", "FREE",
            )],
        })))
        .mount(&api.server)
        .await;
    let by_day = assert_ok!(
        api.slots
            .by_range(&appointment_api::SlotRangeQuery::new(3))
            .await
    );
    let slot = &by_day.values().next().expect("one day expected")[0];
    assert_eq!(slot.status, SlotStatus::Free);

    // Book it.
    Mock::given(method("POST"))
        .and(path("/appointment/"))
        .and(header("authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "provider": 3,
            "appointmentStartDatetimeUtc": "2025-06-02T09:00:00Z",
            "appointmentEndDatetimeUtc": "2025-06-02T09:30:00Z",
            "location": 1,
            "reason": "Persistent cough",
        })))
        .expect(1)
        .mount(&api.server)
        .await;
    assert_ok!(
        api.appointments
            .schedule(&AppointmentPayload {
                patient: None,
                provider: 3,
                appointment_start_datetime_utc: slot.start,
                appointment_end_datetime_utc: slot.end,
                location: 1,
                reason: "Persistent cough".into(),
            })
            .await
    );

    // The access credential expires mid-session; the list call refreshes
    // transparently and replays with the new bearer token.
    Mock::given(method("GET"))
        .and(path("/appointment/"))
        .and(query_param("patient", patient.id.to_string()))
        .and(header("authorization", "Bearer acc"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(MockApiResponses::error_response("Token expired")),
        )
        .mount(&api.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "ref"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "acc2"})))
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointment/"))
        .and(query_param("patient", patient.id.to_string()))
        .and(header("authorization", "Bearer acc2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::appointment_list_item(
                11, &patient, &provider,
                "2025-06-02T09:00:00Z", "2025-06-02T09:30:00Z", "REQUESTED",
            ),
        ])))
        .expect(1)
        .mount(&api.server)
        .await;

    let mine = assert_ok!(api.appointments.patient_appointments(patient.id).await);
    assert_eq!(mine[0].status, AppointmentStatus::Requested);
    assert_eq!(api.store.access_token().as_deref(), Some("acc2"));
    assert_eq!(api.session_expirations(), 0);

    // Provider-side: confirm, then document the visit.
    Mock::given(method("POST"))
        .and(path("/appointment/11/set-status/"))
        .and(body_json(json!({"status": "CONFIRMED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "CONFIRMED"})))
        .expect(1)
        .mount(&api.server)
        .await;
    assert_ok!(api.appointments.set_status(11, AppointmentStatus::Confirmed).await);

    Mock::given(method("POST"))
        .and(path("/medical-record/"))
        .and(header("authorization", "Bearer acc2"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockApiResponses::medical_record_response(5, 2, &provider, "Sinusitis")),
        )
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/medical-record/"))
        .and(query_param("appointment", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockApiResponses::medical_record_response(5, 2, &provider, "Sinusitis"),
        ])))
        .mount(&api.server)
        .await;

    assert_ok!(
        api.medical_records
            .create(&CreateMedicalRecordRequest {
                patient: 2,
                hospital: 1,
                diagnosis: "Sinusitis".into(),
                notes: None,
                prescriptions: None,
            })
            .await
    );
    let record = assert_ok!(api.medical_records.by_appointment(11).await);
    assert_eq!(record.expect("record should exist").diagnosis, "Sinusitis");

    // Logout revokes and clears.
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .and(body_json(json!({"refresh": "ref"})))
        .respond_with(ResponseTemplate::new(205))
        .expect(1)
        .mount(&api.server)
        .await;
    assert_ok!(api.auth.logout().await);
    assert!(api.store.access_token().is_none());
}

#[tokio::test]
async fn stale_session_forces_reauthentication() {
    let api = TestApi::start().await;
    api.api.store_session("acc", "stale");

    Mock::given(method("GET"))
        .and(path("/provider/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(MockApiResponses::error_response("Token expired")),
        )
        .mount(&api.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/token/refresh/"))
        .and(body_json(json!({"refresh": "stale"})))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(MockApiResponses::error_response("Invalid refresh token")),
        )
        .expect(1)
        .mount(&api.server)
        .await;

    let err = api.doctors.list().await.unwrap_err();
    assert!(err.is_auth());
    assert_matches!(err, ApiError::Auth(ref detail) if detail == "Token expired");

    // Unrecoverable: everything cleared, hook told the app to re-login.
    assert!(api.store.access_token().is_none());
    assert!(api.store.refresh_token().is_none());
    assert_eq!(api.session_expirations(), 1);

    // A fresh login rebuilds the session.
    let patient = TestUser::patient("pat@example.com");
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockApiResponses::login_response(&patient, "acc3", "ref3")),
        )
        .expect(1)
        .mount(&api.server)
        .await;
    assert_ok!(
        api.auth
            .login(&LoginRequest {
                email: "pat@example.com".into(),
                password: "hunter2".into(),
            })
            .await
    );
    assert_eq!(api.store.access_token().as_deref(), Some("acc3"));
}
