//! Patient dashboards: the doctor directory seen by browsing and logged-in patients.

use super::doctor_directory::{CardOutcome, DoctorDirectory};
use crate::api::HospitalApi;
use crate::context::PortalContext;
use crate::session::{Role, SessionError};
use crate::ui::Ui;

pub struct PatientDashboard<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
    directory: DoctorDirectory<'a, A, U>,
}

impl<'a, A: HospitalApi, U: Ui> PatientDashboard<'a, A, U> {
    pub fn new(ctx: &'a PortalContext<A, U>) -> Self {
        Self {
            ctx,
            directory: DoctorDirectory::new(ctx),
        }
    }

    pub fn directory(&self) -> &DoctorDirectory<'a, A, U> {
        &self.directory
    }

    /// Page load. A visitor who lands here without choosing a role browses
    /// as a patient.
    pub async fn load(&self) -> Result<bool, SessionError> {
        if self.ctx.session.role() == Role::Anonymous {
            self.ctx.session.select_role(Role::Patient)?;
        }
        Ok(self.directory.load().await)
    }

    pub async fn on_search_input(&self, name: &str) -> bool {
        self.directory.on_search_input(name).await
    }

    pub async fn on_time_change(&self, time: &str) -> bool {
        self.directory.on_time_change(time).await
    }

    pub async fn on_specialty_change(&self, specialty: &str) -> bool {
        self.directory.on_specialty_change(specialty).await
    }

    pub async fn book(&self, doctor_id: &str) -> CardOutcome {
        self.directory.activate_card(doctor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeBackend, PATIENT_TOKEN};
    use crate::ui::Container;

    #[tokio::test]
    async fn anonymous_visitor_browses_as_patient() {
        let backend = FakeBackend::start().await;
        let ctx = backend.context();
        let dashboard = PatientDashboard::new(&ctx);

        assert!(dashboard.load().await.unwrap());

        assert_eq!(ctx.session.role(), Role::Patient);
        let html = ctx.ui.last_render(Container::Content).unwrap();
        assert_eq!(html.matches("Book Now").count(), 3);
    }

    #[tokio::test]
    async fn logged_patient_keeps_role_and_gets_booking_buttons() {
        let backend = FakeBackend::start().await;
        let ctx = backend.context();
        ctx.session.login(Role::LoggedPatient, PATIENT_TOKEN).unwrap();
        ctx.session.set_patient_id("11").unwrap();
        let dashboard = PatientDashboard::new(&ctx);

        dashboard.load().await.unwrap();
        dashboard.on_specialty_change("neurology").await;

        assert_eq!(ctx.session.role(), Role::LoggedPatient);
        let view = dashboard.directory().view().unwrap();
        assert_eq!(view.cards().len(), 1);
        assert_eq!(dashboard.book("2").await, CardOutcome::BookingOpened);
    }
}
