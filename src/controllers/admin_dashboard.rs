//! Admin dashboard: the doctor directory plus the "Add Doctor" dialog.

use std::sync::LazyLock;

use regex::Regex;

use super::doctor_directory::DoctorDirectory;
use crate::api::{Envelope, HospitalApi};
use crate::context::PortalContext;
use crate::models::{parse_available_times, NewDoctor};
use crate::ui::{Modal, Ui};

const NOT_AUTHORIZED: &str = "Authorization failed. Please log in as an administrator.";
const SAVED_DEFAULT: &str = "Doctor added.";

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Raw values of the add-doctor form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub specialty: String,
    /// Comma-separated slots, e.g. `"09:00-10:00, 10:00-11:00"`.
    pub available_times: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in the doctor's {0}.")]
    MissingField(&'static str),
    #[error("Phone number must be exactly 10 digits.")]
    InvalidPhone,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl DoctorForm {
    /// Check required fields and formats, then build the request payload.
    pub fn validate(&self) -> Result<NewDoctor, FormError> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("password", &self.password),
            ("specialty", &self.specialty),
        ];
        if let Some(&(field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FormError::MissingField(field));
        }

        let phone = self.phone.trim();
        if !PHONE_PATTERN.is_match(phone) {
            return Err(FormError::InvalidPhone);
        }
        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            return Err(FormError::InvalidEmail);
        }

        Ok(NewDoctor {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password: self.password.clone(),
            specialty: self.specialty.trim().to_string(),
            available_times: parse_available_times(&self.available_times),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddDoctorOutcome {
    Saved,
    /// No admin token in the session. Nothing was sent.
    Unauthorized,
    Invalid(FormError),
    Failed(String),
}

pub struct AdminDashboard<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
    directory: DoctorDirectory<'a, A, U>,
}

impl<'a, A: HospitalApi, U: Ui> AdminDashboard<'a, A, U> {
    pub fn new(ctx: &'a PortalContext<A, U>) -> Self {
        Self {
            ctx,
            directory: DoctorDirectory::new(ctx),
        }
    }

    pub fn directory(&self) -> &DoctorDirectory<'a, A, U> {
        &self.directory
    }

    pub async fn load(&self) -> bool {
        self.directory.load().await
    }

    pub fn open_add_doctor(&self) {
        self.ctx.ui.open_modal(Modal::AddDoctor);
    }

    /// Submit of the add-doctor dialog.
    pub async fn add_doctor(&self, form: &DoctorForm) -> AddDoctorOutcome {
        let ui = &self.ctx.ui;
        let Some(token) = self.ctx.session.token() else {
            ui.alert(NOT_AUTHORIZED);
            return AddDoctorOutcome::Unauthorized;
        };

        let doctor = match form.validate() {
            Ok(doctor) => doctor,
            Err(e) => {
                ui.alert(&e.to_string());
                return AddDoctorOutcome::Invalid(e);
            }
        };

        match self.ctx.api.save_doctor(&doctor, &token).await {
            Envelope::Success { message, .. } => {
                tracing::info!(specialty = %doctor.specialty, "Doctor added");
                ui.alert(&format!(
                    "Success! {}",
                    message.as_deref().unwrap_or(SAVED_DEFAULT)
                ));
                ui.close_modal();
                self.directory.load().await;
                AddDoctorOutcome::Saved
            }
            Envelope::Failure { message } => {
                ui.alert(&format!("Failed to add doctor: {message}"));
                AddDoctorOutcome::Failed(message)
            }
        }
    }
}
