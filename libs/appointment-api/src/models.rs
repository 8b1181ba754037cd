use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::auth::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Requested => write!(f, "REQUESTED"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMED"),
            AppointmentStatus::Completed => write!(f, "COMPLETED"),
            AppointmentStatus::Cancelled => write!(f, "CANCELLED"),
            AppointmentStatus::Rescheduled => write!(f, "RESCHEDULED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Free,
    Booked,
    Blocked,
    Unavailable,
}

/// Bookable availability slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: i64,
    #[serde(default)]
    pub healthcare_provider: Option<i64>,
    pub hospital_timezone: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: SlotStatus,
    /// Duration string as emitted by the backend, e.g. `"00:30:00"`.
    #[serde(default)]
    pub duration: Option<String>,
}

/// Slots grouped by local calendar day, as served by `/slot/range/`.
pub type SlotsByDay = BTreeMap<NaiveDate, Vec<Slot>>;

#[derive(Debug, Clone)]
pub struct SlotRangeQuery {
    pub provider: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SlotRangeQuery {
    pub fn new(provider: i64) -> Self {
        Self {
            provider,
            start_date: None,
            end_date: None,
        }
    }

    pub fn between(provider: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            provider,
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }

    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("provider".to_string(), self.provider.to_string())];
        // The range endpoint wants both bounds or neither.
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            query.push(("start_date".to_string(), start.to_string()));
            query.push(("end_date".to_string(), end.to_string()));
        }
        query
    }
}

/// Row in the appointment list for either party.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListItem {
    pub id: i64,
    pub patient_id: Uuid,
    pub provider_id: Uuid,
    pub patient_name: String,
    pub provider_name: String,
    pub appointment_start_datetime_utc: DateTime<Utc>,
    pub appointment_end_datetime_utc: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: AppointmentStatus,
}

/// Booking payload for `POST /appointment/`; the backend echoes it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    /// Patient primary key, required only when a provider books on behalf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<i64>,
    pub provider: i64,
    pub appointment_start_datetime_utc: DateTime<Utc>,
    pub appointment_end_datetime_utc: DateTime<Utc>,
    pub location: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub user: User,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub chronic_conditions: Option<String>,
    #[serde(default)]
    pub current_medications: Option<String>,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

// The nested provider block is the one detail payload the backend leaves in
// snake_case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub speciality_name: Option<String>,
    #[serde(default)]
    pub primary_hospital_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Full appointment detail with both parties expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub patient: PatientSummary,
    pub provider: ProviderSummary,
    pub appointment_start_datetime_utc: DateTime<Utc>,
    pub appointment_end_datetime_utc: DateTime<Utc>,
    pub location: String,
    pub reason: String,
    pub status: AppointmentStatus,
}
