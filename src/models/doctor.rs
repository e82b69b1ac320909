use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A doctor as listed by the backend.
///
/// The directory endpoints are not consistent about naming: older handlers
/// send `id`/`specialty`, newer ones `doctorId`/`specialization`. Both are
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(alias = "id", deserialize_with = "deserialize_id")]
    pub doctor_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(alias = "specialty", default)]
    pub specialization: String,
    #[serde(default)]
    pub available_times: Vec<String>,
}

/// Payload for `POST /doctor/save/{token}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub specialty: String,
    pub available_times: Vec<String>,
}

/// Split the comma-separated availability input into slots.
///
/// `"09:00-10:00, 10:00-11:00,"` → `["09:00-10:00", "10:00-11:00"]`
pub fn parse_available_times(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|slot| !slot.is_empty())
        .map(str::to_string)
        .collect()
}
