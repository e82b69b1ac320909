/// Path term that means "no restriction" for the doctor filter endpoint.
pub const FILTER_ALL: &str = "all";

/// Doctor directory filter as typed into the search bar and dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: String,
    pub time: String,
    pub specialty: String,
}

impl FilterCriteria {
    pub fn new(name: impl Into<String>, time: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
            specialty: specialty.into(),
        }
    }

    /// `[name, time, specialty]` with blanks replaced by [`FILTER_ALL`].
    pub fn path_terms(&self) -> [&str; 3] {
        [
            term_or_all(&self.name),
            term_or_all(&self.time),
            term_or_all(&self.specialty),
        ]
    }

    /// True when every term is blank, i.e. the filter selects the full directory.
    pub fn is_unrestricted(&self) -> bool {
        self.path_terms().iter().all(|t| *t == FILTER_ALL)
    }
}

fn term_or_all(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        FILTER_ALL
    } else {
        trimmed
    }
}
