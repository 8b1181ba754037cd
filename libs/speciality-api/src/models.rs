use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Speciality {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
}
