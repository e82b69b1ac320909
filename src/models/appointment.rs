use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// One booked slot, projected onto the patient fields the doctor dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_id")]
    pub patient_id: String,
    pub patient_name: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub patient_email: String,
    #[serde(default)]
    pub prescription_link: Option<String>,
}

/// Sentinel sent in place of a missing patient-name filter.
pub const NO_PATIENT_FILTER: &str = "null";

/// Parameters of an appointment listing for one doctor on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentQuery {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub patient_name: Option<String>,
}

impl AppointmentQuery {
    /// Path segments after `/appointments`, token excluded.
    pub fn path_terms(&self) -> [String; 3] {
        [
            self.doctor_id.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.patient_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(NO_PATIENT_FILTER)
                .to_string(),
        ]
    }
}
