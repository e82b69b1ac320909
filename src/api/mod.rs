//! Hospital backend API.
//!
//! Every call resolves to a value: lists fall back to empty, mutations and
//! filtered reads resolve to an [`Envelope`]. Failures are logged through
//! `tracing` and never raised to the caller. Login calls are the exception:
//! they return `Result<LoginGrant, ApiError>` so the login page can tell a
//! wrong password from an unreachable server.
//!
//! Tokens travel as URL path segments (`/doctor/save/{token}`), not headers.

pub mod client;
pub mod error;
pub mod types;

pub use client::RestClient;
pub use error::ApiError;
pub use types::{AdminCredentials, EmailCredentials, Envelope, LoginGrant};

use crate::models::{Appointment, AppointmentQuery, Doctor, FilterCriteria, NewDoctor, Patient};

/// The REST surface the portal consumes.
#[allow(async_fn_in_trait)]
pub trait HospitalApi {
    /// `GET /doctor`. Empty on any failure.
    async fn get_doctors(&self) -> Vec<Doctor>;

    /// `GET /doctor/filter/{name}/{time}/{specialty}`, blanks sent as `all`.
    async fn filter_doctors(&self, criteria: &FilterCriteria) -> Envelope<Vec<Doctor>>;

    /// `POST /doctor/save/{token}`.
    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> Envelope<()>;

    /// `DELETE /doctor/{doctor_id}/{token}`.
    async fn delete_doctor(&self, doctor_id: &str, token: &str) -> Envelope<()>;

    /// `POST /admin`.
    async fn admin_login(&self, credentials: &AdminCredentials) -> Result<LoginGrant, ApiError>;

    /// `POST /doctor/login`.
    async fn doctor_login(&self, credentials: &EmailCredentials) -> Result<LoginGrant, ApiError>;

    /// `POST /patient/login`.
    async fn patient_login(&self, credentials: &EmailCredentials) -> Result<LoginGrant, ApiError>;

    /// `GET /patient/{patient_id}/{token}`.
    async fn get_patient_details(&self, patient_id: &str, token: &str) -> Envelope<Patient>;

    /// `GET /appointments/{doctor_id}/{date}/{patient_name}/{token}`.
    async fn get_all_appointments(
        &self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Envelope<Vec<Appointment>>;
}
