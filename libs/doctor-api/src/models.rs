use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Healthcare provider profile as served by `/provider/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub speciality: Option<i64>,
    #[serde(default)]
    pub speciality_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub about: Option<String>,
    /// Decimal serialized as a string by the backend.
    #[serde(default)]
    pub fees: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub primary_hospital: Option<i64>,
    #[serde(default)]
    pub primary_hospital_name: Option<String>,
    #[serde(default)]
    pub is_removed: bool,
    #[serde(default)]
    pub removed_at: Option<DateTime<Utc>>,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
