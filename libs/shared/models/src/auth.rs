use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Unassigned,
    Patient,
    Provider,
    AdminStaff,
    SystemAdmin,
}

/// Account payload. Login responds with a trimmed `{id, email, username}`
/// object while `/auth/me/` returns the full profile, so everything beyond
/// the identifying trio is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_patient_profile: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_provider_profile: Option<bool>,
}

/// Body of `POST /auth/token/refresh/`. The rotated refresh credential is
/// only present when the backend rotates on refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Plain `{"detail": ...}` acknowledgement bodies (verification, resets,
/// onboarding).
#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}
