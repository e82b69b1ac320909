//! Wire types and the result envelope shared by all API calls.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{deserialize_opt_id, Appointment, Doctor, Patient};

// ═══════════════════════════════════════════════════════════
// Envelope
// ═══════════════════════════════════════════════════════════

/// Uniform outcome of an API call: `{success, data|message}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success { data: T, message: Option<String> },
    Failure { message: String },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success {
            data,
            message: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::Success {
            data,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message, .. } => message.as_deref(),
            Self::Failure { message } => Some(message),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success { data, .. } => Ok(data),
            Self::Failure { message } => Err(message),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        match self {
            Self::Success { data, message } => Envelope::Success {
                data: f(data),
                message,
            },
            Self::Failure { message } => Envelope::Failure { message },
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { data, message } => {
                let len = if message.is_some() { 3 } else { 2 };
                let mut s = serializer.serialize_struct("Envelope", len)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("data", data)?;
                if let Some(message) = message {
                    s.serialize_field("message", message)?;
                }
                s.end()
            }
            Self::Failure { message } => {
                let mut s = serializer.serialize_struct("Envelope", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("message", message)?;
                s.end()
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════

/// Body of `POST /admin`.
#[derive(Debug, Clone, Serialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /doctor/login` and `POST /patient/login`.
#[derive(Debug, Clone, Serialize)]
pub struct EmailCredentials {
    pub email: String,
    pub password: String,
}

// ═══════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════

/// Token grant returned by every login endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginGrant {
    pub token: String,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub doctor_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub patient_id: Option<String>,
}

/// `{message}` body carried by mutations and by most error responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DoctorsBody {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppointmentsBody {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatientBody {
    pub patient: Patient,
}
