use super::LOGO_SRC;
use crate::config::APP_NAME;

const COLUMNS: &[(&str, &[&str])] = &[
    ("Company", &["About", "Careers", "Press"]),
    ("Support", &["Account", "Help Center", "Contact Us"]),
    ("Legals", &["Terms & Conditions", "Privacy Policy", "Licensing"]),
];

/// Static site footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub copyright_year: i32,
}

impl FooterView {
    pub fn new(copyright_year: i32) -> Self {
        Self { copyright_year }
    }

    pub fn current() -> Self {
        use chrono::Datelike;
        Self::new(chrono::Local::now().year())
    }

    pub fn to_html(&self) -> String {
        let columns: String = COLUMNS
            .iter()
            .map(|(title, links)| {
                let links: String = links
                    .iter()
                    .map(|l| format!(r##"<a href="#">{}</a>"##, super::escape_html(l)))
                    .collect();
                format!(r#"<div class="footer-column"><h4>{title}</h4>{links}</div>"#)
            })
            .collect();

        format!(
            r#"<footer class="footer"><div class="footer-container"><div class="footer-logo"><img src="{LOGO_SRC}" alt="{APP_NAME} Logo"><p>© Copyright {}. All Rights Reserved by {APP_NAME}.</p></div><div class="footer-links">{columns}</div></div></footer>"#,
            self.copyright_year
        )
    }
}
