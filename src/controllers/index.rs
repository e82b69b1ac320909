//! Landing page: role selection and the three login dialogs.

use crate::api::{AdminCredentials, ApiError, EmailCredentials, HospitalApi, LoginGrant};
use crate::context::PortalContext;
use crate::session::{Role, SessionError};
use crate::ui::{Modal, Ui};
use crate::views::header::paths;

const ADMIN_REJECTED: &str = "Invalid username or password.";
const EMAIL_REJECTED: &str = "Invalid email or password.";
const ADMIN_UNREACHABLE: &str = "An error occurred during login. Please try again later.";
const EMAIL_UNREACHABLE: &str = "An error occurred during login. Please check your network connection.";
const ADMIN_FIELDS_MISSING: &str = "Please enter both username and password.";
const EMAIL_FIELDS_MISSING: &str = "Please enter both email and password.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials accepted; session written and dashboard opened.
    LoggedIn(Role),
    /// A field was blank. No request was sent.
    MissingFields,
    /// The backend refused the credentials. Carries the alerted text.
    Rejected(String),
    /// No usable answer from the backend.
    Unreachable,
}

pub struct IndexController<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
}

impl<'a, A: HospitalApi, U: Ui> IndexController<'a, A, U> {
    pub fn new(ctx: &'a PortalContext<A, U>) -> Self {
        Self { ctx }
    }

    /// Role buttons on the landing page.
    ///
    /// Admin and doctor open their login dialog; a patient browses straight
    /// into the patient dashboard.
    pub fn select_role(&self, role: Role) -> Result<(), SessionError> {
        self.ctx.session.select_role(role)?;
        match role {
            Role::Admin => self.ctx.ui.open_modal(Modal::AdminLogin),
            Role::Doctor => self.ctx.ui.open_modal(Modal::DoctorLogin),
            Role::Patient => self.ctx.ui.navigate(paths::PATIENT_DASHBOARD),
            Role::Anonymous | Role::LoggedPatient => {}
        }
        Ok(())
    }

    pub async fn admin_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, SessionError> {
        if username.trim().is_empty() || password.is_empty() {
            self.ctx.ui.alert(ADMIN_FIELDS_MISSING);
            return Ok(LoginOutcome::MissingFields);
        }
        let credentials = AdminCredentials {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.ctx.api.admin_login(&credentials).await;
        self.finish(result, Role::Admin, ADMIN_REJECTED, ADMIN_UNREACHABLE)
    }

    pub async fn doctor_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, SessionError> {
        let Some(credentials) = self.email_credentials(email, password) else {
            return Ok(LoginOutcome::MissingFields);
        };
        let result = self.ctx.api.doctor_login(&credentials).await;
        self.finish(result, Role::Doctor, EMAIL_REJECTED, EMAIL_UNREACHABLE)
    }

    /// Patient login dialog, opened from the patient dashboard header.
    pub async fn patient_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, SessionError> {
        let Some(credentials) = self.email_credentials(email, password) else {
            return Ok(LoginOutcome::MissingFields);
        };
        let result = self.ctx.api.patient_login(&credentials).await;
        self.finish(result, Role::LoggedPatient, EMAIL_REJECTED, EMAIL_UNREACHABLE)
    }

    fn email_credentials(&self, email: &str, password: &str) -> Option<EmailCredentials> {
        if email.trim().is_empty() || password.is_empty() {
            self.ctx.ui.alert(EMAIL_FIELDS_MISSING);
            return None;
        }
        Some(EmailCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        })
    }

    fn finish(
        &self,
        result: Result<LoginGrant, ApiError>,
        role: Role,
        rejected_default: &str,
        unreachable: &str,
    ) -> Result<LoginOutcome, SessionError> {
        let grant = match result {
            Ok(grant) if !grant.token.trim().is_empty() => grant,
            Ok(_) => {
                tracing::warn!(%role, "Login answered without a token");
                return Ok(self.reject(rejected_default.to_string()));
            }
            Err(e @ ApiError::Rejected { .. }) => {
                return Ok(self.reject(e.user_message(rejected_default)));
            }
            Err(_) => {
                self.ctx.ui.alert(unreachable);
                return Ok(LoginOutcome::Unreachable);
            }
        };

        let session = &self.ctx.session;
        session.login(role, &grant.token)?;
        match role {
            Role::Doctor => {
                if let Some(id) = &grant.doctor_id {
                    session.set_doctor_id(id)?;
                }
            }
            Role::LoggedPatient => {
                if let Some(id) = &grant.patient_id {
                    session.set_patient_id(id)?;
                }
            }
            _ => {}
        }

        self.ctx.ui.navigate(dashboard_for(role));
        Ok(LoginOutcome::LoggedIn(role))
    }

    fn reject(&self, message: String) -> LoginOutcome {
        self.ctx.ui.alert(&format!("Login failed: {message}"));
        LoginOutcome::Rejected(message)
    }
}

/// Landing page of each role after login.
pub fn dashboard_for(role: Role) -> &'static str {
    match role {
        Role::Admin => paths::ADMIN_DASHBOARD,
        Role::Doctor => paths::DOCTOR_DASHBOARD,
        Role::Patient => paths::PATIENT_DASHBOARD,
        Role::LoggedPatient => paths::LOGGED_PATIENT_DASHBOARD,
        Role::Anonymous => paths::ROOT,
    }
}
