use serde::{Deserialize, Serialize};

/// Audience tier that controls how much of an event or answer is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    Kids,
    #[default]
    Novice,
    College,
    Expert,
}

impl ReadingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Kids => "kids",
            ReadingLevel::Novice => "novice",
            ReadingLevel::College => "college",
            ReadingLevel::Expert => "expert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kids" => Some(ReadingLevel::Kids),
            "novice" => Some(ReadingLevel::Novice),
            "college" => Some(ReadingLevel::College),
            "expert" => Some(ReadingLevel::Expert),
            _ => None,
        }
    }

    pub fn all() -> Vec<ReadingLevel> {
        vec![
            ReadingLevel::Kids,
            ReadingLevel::Novice,
            ReadingLevel::College,
            ReadingLevel::Expert,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingLevel::Kids => "Kids Edition",
            ReadingLevel::Novice => "High School",
            ReadingLevel::College => "College Level",
            ReadingLevel::Expert => "Expert Scientist",
        }
    }

    /// Only the two academic tiers cite sources.
    pub fn shows_sources(&self) -> bool {
        matches!(self, ReadingLevel::College | ReadingLevel::Expert)
    }

    pub fn shows_figures(&self) -> bool {
        !matches!(self, ReadingLevel::Kids)
    }
}
