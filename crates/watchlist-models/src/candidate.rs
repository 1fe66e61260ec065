use serde::{Deserialize, Serialize};

/// Lightweight search match shown before the full detail record is fetched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub year: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
        }
    }

    pub fn display_title(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}
