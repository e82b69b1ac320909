//! Boundary to the page: dialogs, navigation, modals and markup containers.
//!
//! Controllers never touch a document directly. They call this trait, which a
//! host (browser bridge, webview, test harness) implements.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde::Serialize;

use crate::models::{Doctor, Patient};

/// Modal dialogs the portal can ask the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Modal {
    AdminLogin,
    DoctorLogin,
    PatientLogin,
    PatientSignup,
    AddDoctor,
}

/// Named regions of the page that receive rendered markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Container {
    Header,
    Footer,
    /// Doctor card grid.
    Content,
    /// Appointment table body on the doctor dashboard.
    PatientTable,
}

impl Container {
    /// Element id the host mounts this container under.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Content => "content",
            Self::PatientTable => "patientTableBody",
        }
    }
}

pub trait Ui {
    /// Blocking notification.
    fn alert(&self, message: &str);
    /// Blocking yes/no question.
    fn confirm(&self, message: &str) -> bool;
    /// Full page load of `path`. The new page renders its header from the session.
    fn navigate(&self, path: &str);
    fn open_modal(&self, modal: Modal);
    fn close_modal(&self);
    fn open_booking_overlay(&self, doctor: &Doctor, patient: &Patient);
    /// Replace the contents of `target` with `html`.
    fn render(&self, target: Container, html: &str);
}

// ═══════════════════════════════════════════════════════════
// RecordingUi
// ═══════════════════════════════════════════════════════════

/// Everything a controller asked of the page, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEvent {
    Alert { message: String },
    Confirm { message: String },
    Navigate { path: String },
    OpenModal { modal: Modal },
    CloseModal,
    BookingOverlay { doctor_id: String, patient_id: String },
    Render { target: Container, html: String },
}

/// Headless [`Ui`] that records every call. `confirm` answers with a
/// configurable value (default yes).
#[derive(Debug)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
    confirm_answer: AtomicBool,
}

impl Default for RecordingUi {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            confirm_answer: AtomicBool::new(true),
        }
    }
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::Relaxed);
    }

    fn push(&self, event: UiEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Alert { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::Navigate { path } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn modals(&self) -> Vec<Modal> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::OpenModal { modal } => Some(modal),
                _ => None,
            })
            .collect()
    }

    /// Most recent markup rendered into `target`.
    pub fn last_render(&self, target: Container) -> Option<String> {
        self.events().into_iter().rev().find_map(|e| match e {
            UiEvent::Render { target: t, html } if t == target => Some(html),
            _ => None,
        })
    }
}

impl Ui for RecordingUi {
    fn alert(&self, message: &str) {
        tracing::debug!(text = message, "Alert shown");
        self.push(UiEvent::Alert {
            message: message.to_string(),
        });
    }

    fn confirm(&self, message: &str) -> bool {
        self.push(UiEvent::Confirm {
            message: message.to_string(),
        });
        self.confirm_answer.load(Ordering::Relaxed)
    }

    fn navigate(&self, path: &str) {
        self.push(UiEvent::Navigate {
            path: path.to_string(),
        });
    }

    fn open_modal(&self, modal: Modal) {
        self.push(UiEvent::OpenModal { modal });
    }

    fn close_modal(&self) {
        self.push(UiEvent::CloseModal);
    }

    fn open_booking_overlay(&self, doctor: &Doctor, patient: &Patient) {
        self.push(UiEvent::BookingOverlay {
            doctor_id: doctor.doctor_id.clone(),
            patient_id: patient.id.clone(),
        });
    }

    fn render(&self, target: Container, html: &str) {
        tracing::trace!(container = target.element_id(), bytes = html.len(), "Markup rendered");
        self.push(UiEvent::Render {
            target,
            html: html.to_string(),
        });
    }
}
