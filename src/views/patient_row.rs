use serde::Serialize;

use super::escape_html;
use crate::models::Appointment;

/// Link shown when an appointment has no prescription yet.
const NO_PRESCRIPTION_LINK: &str = "#";
const COLUMNS: usize = 5;

/// One row of the doctor's appointment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub prescription_link: String,
}

impl PatientRow {
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            id: appointment.patient_id.clone(),
            name: appointment.patient_name.clone(),
            phone: appointment.patient_phone.clone(),
            email: appointment.patient_email.clone(),
            prescription_link: appointment
                .prescription_link
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| NO_PRESCRIPTION_LINK.to_string()),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<tr><td class="patient-id">{}</td><td>{}</td><td>{}</td><td>{}</td><td><a class="prescription-btn" href="{}">Prescription</a></td></tr>"#,
            escape_html(&self.id),
            escape_html(&self.name),
            escape_html(&self.phone),
            escape_html(&self.email),
            escape_html(&self.prescription_link),
        )
    }
}

/// What the appointment table body currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppointmentTable {
    Loading,
    Rows { rows: Vec<PatientRow> },
    Empty { message: String },
    Error { message: String },
}

impl AppointmentTable {
    pub fn rows(&self) -> &[PatientRow] {
        match self {
            Self::Rows { rows } => rows,
            _ => &[],
        }
    }

    pub fn to_html(&self) -> String {
        let message_row = |class: &str, text: &str| {
            format!(
                r#"<tr><td colspan="{COLUMNS}" class="{class}">{}</td></tr>"#,
                escape_html(text)
            )
        };
        match self {
            Self::Loading => message_row("loading", "Loading appointments..."),
            Self::Rows { rows } => rows.iter().map(PatientRow::to_html).collect(),
            Self::Empty { message } => message_row("noPatientRecord", message),
            Self::Error { message } => message_row("noPatientRecord error", message),
        }
    }
}
