//! Doctor card grid shared by the admin and patient dashboards.
//!
//! Loads the directory, re-filters on every search/dropdown event and runs
//! the role-specific card action. Overlapping refreshes are ordered by a
//! [`RequestSequencer`]: only the newest request's answer reaches the grid.

use std::sync::Mutex;

use super::{load, settle, store};
use crate::api::{Envelope, HospitalApi};
use crate::context::PortalContext;
use crate::models::{Doctor, FilterCriteria};
use crate::sequencer::{RequestSequencer, RequestTicket};
use crate::ui::{Container, Ui};
use crate::views::header::paths;
use crate::views::{CardAction, DoctorListView};

pub const NO_DOCTORS: &str = "No doctors currently registered.";
pub const NO_MATCHES: &str = "No doctors found with the given filters.";
const LOGIN_TO_BOOK: &str = "Please log in or sign up to book an appointment.";
const BOOKING_SESSION_EXPIRED: &str = "Session expired. Please log in again.";
const TOKEN_MISSING: &str = "Authentication token missing. Please log in again.";

/// What a card click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardOutcome {
    Deleted,
    DeleteCancelled,
    DeleteFailed(String),
    LoginRequired,
    BookingOpened,
    BookingFailed(String),
    /// Token or patient id missing; sent back to `/`.
    SessionExpired,
    /// Read-only card, or no card with that id.
    NoAction,
}

pub struct DoctorDirectory<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
    view: Mutex<DoctorListView>,
    criteria: Mutex<FilterCriteria>,
    sequencer: RequestSequencer,
}

impl<'a, A: HospitalApi, U: Ui> DoctorDirectory<'a, A, U> {
    pub fn new(ctx: &'a PortalContext<A, U>) -> Self {
        Self {
            ctx,
            view: Mutex::new(DoctorListView::Empty {
                message: NO_DOCTORS.to_string(),
            }),
            criteria: Mutex::new(FilterCriteria::default()),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn view(&self) -> Option<DoctorListView> {
        load(&self.view)
    }

    pub fn criteria(&self) -> Option<FilterCriteria> {
        load(&self.criteria)
    }

    // ── Loading ──────────────────────────────────────────

    /// Fetch the whole directory. Returns whether the answer was shown.
    pub async fn load(&self) -> bool {
        let ticket = self.sequencer.issue();
        let doctors = self.ctx.api.get_doctors().await;
        if !self.is_current(ticket, "directory") {
            return false;
        }
        tracing::debug!(count = doctors.len(), "Doctor directory loaded");
        self.show(DoctorListView::from_doctors(
            &doctors,
            self.ctx.session.role(),
            NO_DOCTORS,
        ));
        true
    }

    /// Search bar keystroke.
    pub async fn on_search_input(&self, name: &str) -> bool {
        self.update_criteria(|c| c.name = name.trim().to_string());
        let ticket = self.sequencer.issue();
        if !settle(&self.ctx.config, &self.sequencer, ticket).await {
            return false;
        }
        self.filter(ticket).await
    }

    pub async fn on_time_change(&self, time: &str) -> bool {
        self.update_criteria(|c| c.time = time.to_string());
        let ticket = self.sequencer.issue();
        self.filter(ticket).await
    }

    pub async fn on_specialty_change(&self, specialty: &str) -> bool {
        self.update_criteria(|c| c.specialty = specialty.to_string());
        let ticket = self.sequencer.issue();
        self.filter(ticket).await
    }

    fn update_criteria(&self, edit: impl FnOnce(&mut FilterCriteria)) {
        if let Ok(mut criteria) = self.criteria.lock() {
            edit(&mut criteria);
        }
    }

    async fn filter(&self, ticket: RequestTicket) -> bool {
        let criteria = self.criteria().unwrap_or_default();
        let result = self.ctx.api.filter_doctors(&criteria).await;
        if !self.is_current(ticket, "filter") {
            return false;
        }
        match result {
            Envelope::Success { data, .. } => {
                self.show(DoctorListView::from_doctors(
                    &data,
                    self.ctx.session.role(),
                    NO_MATCHES,
                ));
            }
            Envelope::Failure { message } => {
                self.ctx
                    .ui
                    .alert(&format!("Error filtering doctors: {message}"));
                self.show(DoctorListView::Error {
                    message: format!("Error: {message}"),
                });
            }
        }
        true
    }

    fn is_current(&self, ticket: RequestTicket, kind: &str) -> bool {
        let current = self.sequencer.is_current(ticket);
        if !current {
            tracing::debug!(kind, "Discarding stale directory response");
        }
        current
    }

    fn show(&self, view: DoctorListView) {
        self.ctx.ui.render(Container::Content, &view.to_html());
        store(&self.view, view);
    }

    // ── Card actions ─────────────────────────────────────

    /// Click on the action button of the card for `doctor_id`.
    pub async fn activate_card(&self, doctor_id: &str) -> CardOutcome {
        let card = self
            .view
            .lock()
            .ok()
            .and_then(|view| view.find(doctor_id).cloned());
        let Some(card) = card else {
            tracing::warn!(doctor_id, "Card action for a doctor not on the grid");
            return CardOutcome::NoAction;
        };

        match card.action {
            None => CardOutcome::NoAction,
            Some(CardAction::Delete) => self.delete(&card.doctor).await,
            Some(CardAction::BookRequiresLogin) => {
                self.ctx.ui.alert(LOGIN_TO_BOOK);
                CardOutcome::LoginRequired
            }
            Some(CardAction::Book) => self.book(&card.doctor).await,
        }
    }

    async fn delete(&self, doctor: &Doctor) -> CardOutcome {
        let ui = &self.ctx.ui;
        if !ui.confirm(&format!(
            "Are you sure you want to delete Doctor {}?",
            doctor.name
        )) {
            return CardOutcome::DeleteCancelled;
        }
        let Some(token) = self.ctx.session.token() else {
            ui.alert(TOKEN_MISSING);
            return CardOutcome::DeleteFailed(TOKEN_MISSING.to_string());
        };

        match self.ctx.api.delete_doctor(&doctor.doctor_id, &token).await {
            Envelope::Success { .. } => {
                let view = self.view.lock().ok().map(|mut view| {
                    view.remove(&doctor.doctor_id, NO_DOCTORS);
                    view.clone()
                });
                if let Some(view) = view {
                    ui.render(Container::Content, &view.to_html());
                }
                tracing::info!(doctor_id = %doctor.doctor_id, "Doctor deleted");
                ui.alert(&format!("Doctor {} successfully deleted.", doctor.name));
                CardOutcome::Deleted
            }
            Envelope::Failure { message } => {
                ui.alert(&format!("Failed to delete doctor: {message}"));
                CardOutcome::DeleteFailed(message)
            }
        }
    }

    async fn book(&self, doctor: &Doctor) -> CardOutcome {
        let session = &self.ctx.session;
        let ui = &self.ctx.ui;
        let (Some(token), Some(patient_id)) = (session.token(), session.patient_id()) else {
            ui.alert(BOOKING_SESSION_EXPIRED);
            ui.navigate(paths::ROOT);
            return CardOutcome::SessionExpired;
        };

        match self.ctx.api.get_patient_details(&patient_id, &token).await {
            Envelope::Success { data: patient, .. } => {
                ui.open_booking_overlay(doctor, &patient);
                CardOutcome::BookingOpened
            }
            Envelope::Failure { message } => {
                ui.alert(&format!("Error preparing booking: {message}"));
                CardOutcome::BookingFailed(message)
            }
        }
    }
}
