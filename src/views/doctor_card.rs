use std::fmt::Write;

use serde::Serialize;

use super::escape_html;
use crate::models::Doctor;
use crate::session::Role;

/// Button a card offers, decided by the viewer's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    /// Admin: remove the doctor after confirmation.
    Delete,
    /// Browsing patient: booking needs a login first.
    BookRequiresLogin,
    /// Logged-in patient: open the booking overlay.
    Book,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Delete => "Delete Doctor",
            Self::BookRequiresLogin => "Book Now",
            Self::Book => "Book Appointment",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Self::Delete => "adminBtn delete-btn",
            Self::BookRequiresLogin => "book-now-btn",
            Self::Book => "book-now-btn primary-btn",
        }
    }

    /// Action for `role`, `None` when the role gets a read-only card.
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Self::Delete),
            Role::Patient => Some(Self::BookRequiresLogin),
            Role::LoggedPatient => Some(Self::Book),
            Role::Doctor | Role::Anonymous => None,
        }
    }
}

/// One card in the doctor grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    pub doctor: Doctor,
    pub action: Option<CardAction>,
}

impl DoctorCard {
    pub fn render(doctor: &Doctor, role: Role) -> Self {
        Self {
            doctor: doctor.clone(),
            action: CardAction::for_role(role),
        }
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor.doctor_id
    }

    pub fn to_html(&self) -> String {
        let d = &self.doctor;
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<div class="doctor-card" data-doctor-id="{}"><div class="doctor-info"><h3 class="doctor-name">{}</h3><p class="doctor-specialty">{}</p><p class="doctor-email">Email: {}</p><div class="appointment-times"><h4>Available Slots:</h4><ul>"#,
            escape_html(&d.doctor_id),
            escape_html(&d.name),
            escape_html(&d.specialization),
            escape_html(&d.email),
        );
        for slot in &d.available_times {
            let _ = write!(html, "<li>{}</li>", escape_html(slot));
        }
        html.push_str(r#"</ul></div></div><div class="doctor-actions">"#);
        if let Some(action) = self.action {
            let _ = write!(
                html,
                r#"<button class="{}" data-action="{}">{}</button>"#,
                action.css_class(),
                escape_html(&d.doctor_id),
                action.label()
            );
        }
        html.push_str("</div></div>");
        html
    }
}

/// What the doctor grid currently shows. Never blank: an empty directory or a
/// failure is a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DoctorListView {
    Cards { cards: Vec<DoctorCard> },
    Empty { message: String },
    Error { message: String },
}

impl DoctorListView {
    pub fn from_doctors(doctors: &[Doctor], role: Role, empty_message: &str) -> Self {
        if doctors.is_empty() {
            Self::Empty {
                message: empty_message.to_string(),
            }
        } else {
            Self::Cards {
                cards: doctors.iter().map(|d| DoctorCard::render(d, role)).collect(),
            }
        }
    }

    pub fn cards(&self) -> &[DoctorCard] {
        match self {
            Self::Cards { cards } => cards,
            Self::Empty { .. } | Self::Error { .. } => &[],
        }
    }

    pub fn find(&self, doctor_id: &str) -> Option<&DoctorCard> {
        self.cards().iter().find(|c| c.doctor_id() == doctor_id)
    }

    /// Remove the card for `doctor_id`. Returns whether a card was removed.
    /// Removing the last card leaves `empty_message` in its place.
    pub fn remove(&mut self, doctor_id: &str, empty_message: &str) -> bool {
        let Self::Cards { cards } = self else {
            return false;
        };
        let Some(index) = cards.iter().position(|c| c.doctor_id() == doctor_id) else {
            return false;
        };
        cards.remove(index);
        if cards.is_empty() {
            *self = Self::Empty {
                message: empty_message.to_string(),
            };
        }
        true
    }

    pub fn to_html(&self) -> String {
        match self {
            Self::Cards { cards } => cards.iter().map(DoctorCard::to_html).collect(),
            Self::Empty { message } => {
                format!(r#"<p class="noPatientRecord">{}</p>"#, escape_html(message))
            }
            Self::Error { message } => {
                format!(r#"<p class="noPatientRecord error">{}</p>"#, escape_html(message))
            }
        }
    }
}
