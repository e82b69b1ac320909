//! Markup renderers. Each view is a plain struct built from data plus the
//! current role, with a `to_html` that the controllers hand to `Ui::render`.

pub mod doctor_card;
pub mod footer;
pub mod header;
pub mod patient_row;

pub use doctor_card::{CardAction, DoctorCard, DoctorListView};
pub use footer::FooterView;
pub use header::{HeaderView, NavItem};
pub use patient_row::{AppointmentTable, PatientRow};

/// Logo shown in header and footer.
pub(crate) const LOGO_SRC: &str = "../assets/images/logo/logo.png";

/// Escape text for element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
