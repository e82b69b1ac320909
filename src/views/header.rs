use serde::Serialize;

use super::LOGO_SRC;
use crate::config::APP_NAME;
use crate::session::Role;

/// Page paths the header links to.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const ADMIN_DASHBOARD: &str = "/pages/adminDashboard.html";
    pub const DOCTOR_DASHBOARD: &str = "/pages/doctorDashboard.html";
    pub const PATIENT_DASHBOARD: &str = "/pages/patientDashboard.html";
    pub const LOGGED_PATIENT_DASHBOARD: &str = "/pages/loggedPatientDashboard.html";
    pub const PATIENT_APPOINTMENTS: &str = "/pages/patientAppointments.html";
}

/// Header navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavItem {
    AddDoctor,
    DoctorHome,
    PatientLogin,
    PatientSignup,
    PatientHome,
    PatientAppointments,
    Logout,
    LogoutPatient,
}

impl NavItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddDoctor => "Add Doctor",
            Self::DoctorHome | Self::PatientHome => "Home",
            Self::PatientLogin => "Login",
            Self::PatientSignup => "Sign Up",
            Self::PatientAppointments => "Appointments",
            Self::Logout | Self::LogoutPatient => "Logout",
        }
    }

    fn to_html(self) -> String {
        match self {
            Self::AddDoctor => format!(
                r#"<button id="addDocBtn" class="adminBtn" data-nav="add_doctor">{}</button>"#,
                self.label()
            ),
            Self::DoctorHome => format!(
                r#"<button class="adminBtn" data-href="{}">{}</button>"#,
                paths::DOCTOR_DASHBOARD,
                self.label()
            ),
            Self::PatientLogin => format!(
                r#"<button id="patientLogin" class="adminBtn" data-nav="patient_login">{}</button>"#,
                self.label()
            ),
            Self::PatientSignup => format!(
                r#"<button id="patientSignup" class="adminBtn" data-nav="patient_signup">{}</button>"#,
                self.label()
            ),
            Self::PatientHome => format!(
                r#"<button id="home" class="adminBtn" data-href="{}">{}</button>"#,
                paths::LOGGED_PATIENT_DASHBOARD,
                self.label()
            ),
            Self::PatientAppointments => format!(
                r#"<button id="patientAppointments" class="adminBtn" data-href="{}">{}</button>"#,
                paths::PATIENT_APPOINTMENTS,
                self.label()
            ),
            Self::Logout => format!(r##"<a href="#" data-nav="logout">{}</a>"##, self.label()),
            Self::LogoutPatient => {
                format!(r##"<a href="#" data-nav="logout_patient">{}</a>"##, self.label())
            }
        }
    }
}

/// Header chrome for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub role: Role,
    pub nav: Vec<NavItem>,
}

impl HeaderView {
    pub fn for_role(role: Role) -> Self {
        let nav = match role {
            Role::Admin => vec![NavItem::AddDoctor, NavItem::Logout],
            Role::Doctor => vec![NavItem::DoctorHome, NavItem::Logout],
            Role::Patient => vec![NavItem::PatientLogin, NavItem::PatientSignup],
            Role::LoggedPatient => vec![
                NavItem::PatientHome,
                NavItem::PatientAppointments,
                NavItem::LogoutPatient,
            ],
            Role::Anonymous => Vec::new(),
        };
        Self { role, nav }
    }

    /// Logo-only header used on the landing page.
    pub fn landing() -> Self {
        Self::for_role(Role::Anonymous)
    }

    pub fn to_html(&self) -> String {
        let logo = format!(
            r#"<div class="logo-section"><img src="{LOGO_SRC}" alt="{APP_NAME} Logo" class="logo-img"><span class="logo-title">{APP_NAME}</span></div>"#
        );
        if self.nav.is_empty() {
            return format!(r#"<header class="header">{logo}</header>"#);
        }
        let items: String = self.nav.iter().map(|item| item.to_html()).collect();
        format!(r#"<header class="header">{logo}<nav class="header-nav">{items}</nav></header>"#)
    }
}
