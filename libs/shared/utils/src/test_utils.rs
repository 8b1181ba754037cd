use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::User;

/// Test account used to seed mock responses across the crates' test suites.
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("test@example.com", "patient")
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.to_string(),
            username: email.split('@').next().unwrap_or("user").to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn provider(email: &str) -> Self {
        Self::new(email, "provider")
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_user(&self) -> User {
        serde_json::from_value(MockApiResponses::me_response(self))
            .expect("test user should deserialize")
    }
}

/// Canned camelCase bodies matching the backend's serializer output.
pub struct MockApiResponses;

impl MockApiResponses {
    pub fn login_response(user: &TestUser, access: &str, refresh: &str) -> Value {
        json!({
            "access": access,
            "refresh": refresh,
            "user": {
                "id": user.id,
                "email": user.email,
                "username": user.username,
            }
        })
    }

    pub fn me_response(user: &TestUser) -> Value {
        json!({
            "id": user.id,
            "email": user.email,
            "username": user.username,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "userRole": user.role,
            "hasPatientProfile": user.role == "patient",
            "hasProviderProfile": user.role == "provider",
        })
    }

    pub fn doctor_response(id: i64, user: &TestUser, speciality_name: &str) -> Value {
        json!({
            "id": id,
            "username": user.username,
            "firstName": user.first_name,
            "lastName": user.last_name,
            "speciality": 1,
            "specialityName": speciality_name,
            "image": null,
            "education": "MB BCh BAO",
            "yearsOfExperience": 8,
            "about": "General practice with a focus on preventive care.",
            "fees": "50.00",
            "addressLine1": "12 Clinic Row",
            "addressLine2": "",
            "city": "Dublin",
            "state": "Leinster",
            "zipCode": "D02",
            "licenseNumber": "IMC-123456",
            "certifications": "",
            "primaryHospital": 1,
            "primaryHospitalName": "St. Example's",
            "isRemoved": false,
            "removedAt": null,
        })
    }

    pub fn speciality_response(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "image": format!("/media/specialities/{}.png", id),
        })
    }

    pub fn slot_response(id: i64, start: &str, end: &str, status: &str) -> Value {
        json!({
            "id": id,
            "healthcareProvider": 1,
            "hospitalTimezone": "Europe/Dublin",
            "start": start,
            "end": end,
            "status": status,
            "duration": "00:30:00",
        })
    }

    pub fn appointment_list_item(
        id: i64,
        patient: &TestUser,
        provider: &TestUser,
        start: &str,
        end: &str,
        status: &str,
    ) -> Value {
        json!({
            "id": id,
            "patientId": patient.id,
            "providerId": provider.id,
            "patientName": patient.full_name(),
            "providerName": provider.full_name(),
            "appointmentStartDatetimeUtc": start,
            "appointmentEndDatetimeUtc": end,
            "location": 1,
            "reason": "Follow-up",
            "status": status,
        })
    }

    pub fn patient_response(user: &TestUser) -> Value {
        json!({
            "user": {
                "id": user.id,
                "email": user.email,
                "username": user.username,
                "firstName": user.first_name,
                "lastName": user.last_name,
            },
            "bloodType": "O+",
            "allergies": "Penicillin",
            "chronicConditions": null,
            "currentMedications": null,
            "insurance": "VHI",
            "weight": 72.5,
            "height": 180.0,
        })
    }

    pub fn medical_record_response(
        id: i64,
        patient_pk: i64,
        provider: &TestUser,
        diagnosis: &str,
    ) -> Value {
        json!({
            "id": id,
            "patient": patient_pk,
            "providerId": provider.id,
            "hospital": 1,
            "diagnosis": diagnosis,
            "notes": "Prescribed rest and fluids.",
            "prescriptions": "Paracetamol 500mg",
        })
    }

    pub fn error_response(detail: &str) -> Value {
        json!({ "detail": detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trips_through_me_response() {
        let provider = TestUser::provider("doc@example.com");
        let user = provider.to_user();
        assert_eq!(user.email, "doc@example.com");
        assert_eq!(user.username, "doc");
        assert_eq!(user.has_provider_profile, Some(true));
    }
}
