//! Header and footer chrome shared by every page.

use crate::context::PortalContext;
use crate::session::{Role, SessionCheck, SessionError};
use crate::ui::{Container, Modal, Ui};
use crate::views::header::paths;
use crate::views::{FooterView, HeaderView, NavItem};

const SESSION_EXPIRED: &str = "Session expired or invalid login. Please log in again.";
const LOGGED_OUT: &str = "Logged out successfully.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderOutcome {
    /// Landing page: role cleared, logo-only header.
    Landing,
    Rendered(Role),
    /// Authenticated role without a token. Nothing was rendered; the page
    /// was sent back to `/`.
    Expired(Role),
}

pub struct HeaderController<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
}

impl<'a, A, U: Ui> HeaderController<'a, A, U> {
    pub fn new(ctx: &'a PortalContext<A, U>) -> Self {
        Self { ctx }
    }

    /// Render the header for the page at `path`.
    ///
    /// Must be called again after any role or token change.
    pub fn render(&self, path: &str) -> Result<HeaderOutcome, SessionError> {
        let session = &self.ctx.session;

        if path.ends_with('/') {
            session.clear_role()?;
            self.ctx
                .ui
                .render(Container::Header, &HeaderView::landing().to_html());
            return Ok(HeaderOutcome::Landing);
        }

        match session.check() {
            SessionCheck::Expired(role) => {
                tracing::info!(%role, path, "Session expired, returning to landing page");
                session.clear_role()?;
                self.ctx.ui.alert(SESSION_EXPIRED);
                self.ctx.ui.navigate(paths::ROOT);
                Ok(HeaderOutcome::Expired(role))
            }
            SessionCheck::Valid(role) => {
                self.ctx
                    .ui
                    .render(Container::Header, &HeaderView::for_role(role).to_html());
                Ok(HeaderOutcome::Rendered(role))
            }
        }
    }

    /// Click on a header entry.
    pub fn activate(&self, item: NavItem) -> Result<(), SessionError> {
        let ui = &self.ctx.ui;
        match item {
            NavItem::AddDoctor => ui.open_modal(Modal::AddDoctor),
            NavItem::DoctorHome => ui.navigate(paths::DOCTOR_DASHBOARD),
            NavItem::PatientLogin => ui.open_modal(Modal::PatientLogin),
            NavItem::PatientSignup => ui.open_modal(Modal::PatientSignup),
            NavItem::PatientHome => ui.navigate(paths::LOGGED_PATIENT_DASHBOARD),
            NavItem::PatientAppointments => ui.navigate(paths::PATIENT_APPOINTMENTS),
            NavItem::Logout => return self.logout(),
            NavItem::LogoutPatient => return self.logout_patient(),
        }
        Ok(())
    }

    /// Clear the whole session and return to the landing page.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.ctx.session.logout()?;
        self.ctx.ui.alert(LOGGED_OUT);
        self.ctx.ui.navigate(paths::ROOT);
        Ok(())
    }

    /// Drop the patient's credential but keep them browsing as a patient.
    pub fn logout_patient(&self) -> Result<(), SessionError> {
        self.ctx.session.logout_patient()?;
        self.ctx.ui.alert(LOGGED_OUT);
        self.ctx.ui.navigate(paths::PATIENT_DASHBOARD);
        Ok(())
    }

    pub fn render_footer(&self) {
        self.ctx
            .ui
            .render(Container::Footer, &FooterView::current().to_html());
    }
}
