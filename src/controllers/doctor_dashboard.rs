//! Doctor dashboard: the day's appointments, filterable by patient name.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::{load, settle, store};
use crate::api::{Envelope, HospitalApi};
use crate::context::PortalContext;
use crate::models::AppointmentQuery;
use crate::sequencer::{RequestSequencer, RequestTicket};
use crate::ui::{Container, Ui};
use crate::views::{AppointmentTable, PatientRow};

pub const TOKEN_MISSING: &str = "Authentication token missing. Please log in again.";
pub const LOAD_FAILED: &str = "Error loading appointments. Try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    date: NaiveDate,
    patient_name: Option<String>,
}

pub struct DoctorDashboard<'a, A, U> {
    ctx: &'a PortalContext<A, U>,
    today: NaiveDate,
    selection: Mutex<Selection>,
    table: Mutex<AppointmentTable>,
    sequencer: RequestSequencer,
}

impl<'a, A: HospitalApi, U: Ui> DoctorDashboard<'a, A, U> {
    /// Dashboard whose "today" is `today`; the date picker starts there.
    pub fn new(ctx: &'a PortalContext<A, U>, today: NaiveDate) -> Self {
        Self {
            ctx,
            today,
            selection: Mutex::new(Selection {
                date: today,
                patient_name: None,
            }),
            table: Mutex::new(AppointmentTable::Loading),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn for_today(ctx: &'a PortalContext<A, U>) -> Self {
        Self::new(ctx, chrono::Local::now().date_naive())
    }

    pub fn selected_date(&self) -> NaiveDate {
        load(&self.selection).map_or(self.today, |s| s.date)
    }

    pub fn table(&self) -> Option<AppointmentTable> {
        load(&self.table)
    }

    // ── Events ───────────────────────────────────────────

    pub async fn load(&self) -> bool {
        let ticket = self.sequencer.issue();
        self.fetch(ticket).await
    }

    pub async fn on_date_change(&self, date: NaiveDate) -> bool {
        self.select(|s| s.date = date);
        self.load().await
    }

    /// "Today" shortcut.
    pub async fn on_today(&self) -> bool {
        let today = self.today;
        self.select(|s| s.date = today);
        self.load().await
    }

    /// Name filter keystroke. Blank input clears the filter.
    pub async fn on_search_input(&self, text: &str) -> bool {
        let name = Some(text.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self.select(|s| s.patient_name = name);
        let ticket = self.sequencer.issue();
        if !settle(&self.ctx.config, &self.sequencer, ticket).await {
            return false;
        }
        self.fetch(ticket).await
    }

    fn select(&self, edit: impl FnOnce(&mut Selection)) {
        if let Ok(mut selection) = self.selection.lock() {
            edit(&mut selection);
        }
    }

    // ── Fetch ────────────────────────────────────────────

    async fn fetch(&self, ticket: RequestTicket) -> bool {
        let session = &self.ctx.session;
        let (Some(token), Some(doctor_id)) = (session.token(), session.doctor_id()) else {
            self.show(AppointmentTable::Error {
                message: TOKEN_MISSING.to_string(),
            });
            return true;
        };
        let Some(selection) = load(&self.selection) else {
            return false;
        };

        self.show(AppointmentTable::Loading);
        let query = AppointmentQuery {
            doctor_id,
            date: selection.date,
            patient_name: selection.patient_name,
        };
        let result = self.ctx.api.get_all_appointments(&query, &token).await;

        if !self.sequencer.is_current(ticket) {
            tracing::debug!(date = %query.date, "Discarding stale appointment response");
            return false;
        }

        let table = match result {
            Envelope::Success { data, .. } if data.is_empty() => AppointmentTable::Empty {
                message: format!("No appointments found for {}.", self.day_label(query.date)),
            },
            Envelope::Success { data, .. } => AppointmentTable::Rows {
                rows: data.iter().map(PatientRow::from_appointment).collect(),
            },
            Envelope::Failure { .. } => AppointmentTable::Error {
                message: LOAD_FAILED.to_string(),
            },
        };
        self.show(table);
        true
    }

    fn day_label(&self, date: NaiveDate) -> String {
        if date == self.today {
            "today".to_string()
        } else {
            date.format("%Y-%m-%d").to_string()
        }
    }

    fn show(&self, table: AppointmentTable) {
        self.ctx.ui.render(Container::PatientTable, &table.to_html());
        store(&self.table, table);
    }
}
