//! Page controllers.
//!
//! Each controller borrows the [`PortalContext`](crate::context::PortalContext)
//! and reacts to one page's events: it reads the session, calls the API,
//! renders views and reports through the [`Ui`](crate::ui::Ui) boundary.
//! Handlers return an outcome enum so callers (and tests) can tell what
//! happened without scraping the page.

pub mod admin_dashboard;
pub mod doctor_dashboard;
pub mod doctor_directory;
pub mod header;
pub mod index;
pub mod patient_dashboard;

pub use admin_dashboard::{AddDoctorOutcome, AdminDashboard, DoctorForm, FormError};
pub use doctor_dashboard::DoctorDashboard;
pub use doctor_directory::{CardOutcome, DoctorDirectory};
pub use header::{HeaderController, HeaderOutcome};
pub use index::{IndexController, LoginOutcome};
pub use patient_dashboard::PatientDashboard;

use std::sync::Mutex;

use crate::config::PortalConfig;
use crate::sequencer::{RequestSequencer, RequestTicket};

/// Wait out the keystroke debounce window.
///
/// Returns `false` when a newer ticket was issued while waiting; the caller
/// then skips its request. With debouncing off this returns immediately.
pub(crate) async fn settle(
    config: &PortalConfig,
    sequencer: &RequestSequencer,
    ticket: RequestTicket,
) -> bool {
    if !config.debounce_enabled() {
        return true;
    }
    tokio::time::sleep(config.search_debounce).await;
    sequencer.is_current(ticket)
}

pub(crate) fn store<T>(slot: &Mutex<T>, value: T) {
    if let Ok(mut guard) = slot.lock() {
        *guard = value;
    }
}

pub(crate) fn load<T: Clone>(slot: &Mutex<T>) -> Option<T> {
    slot.lock().map(|guard| guard.clone()).ok()
}
