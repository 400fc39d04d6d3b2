use crate::reading_level::ReadingLevel;
use crate::responses::{LevelText, ResponseEntry, FALLBACK, RESPONSES};

/// Ordered table of canonical questions plus the per-level fallback.
#[derive(Debug, Clone, Copy)]
pub struct ResponseTable<'a> {
    entries: &'a [ResponseEntry],
    fallback: &'a LevelText,
}

impl Default for ResponseTable<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> ResponseTable<'a> {
    pub fn new(entries: &'a [ResponseEntry], fallback: &'a LevelText) -> Self {
        Self { entries, fallback }
    }

    pub fn builtin() -> ResponseTable<'static> {
        ResponseTable::new(RESPONSES, &FALLBACK)
    }

    pub fn entries(&self) -> &'a [ResponseEntry] {
        self.entries
    }

    /// First entry whose question appears (case-insensitively) inside the
    /// trimmed input. Table order decides between overlapping questions.
    pub fn find(&self, text: &str) -> Option<&'a ResponseEntry> {
        let normalized = text.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| normalized.contains(&entry.question.to_lowercase()))
    }

    pub fn answer(&self, text: &str, level: ReadingLevel) -> &'static str {
        match self.find(text) {
            Some(entry) => entry.answers.for_level(level),
            None => self.fallback.for_level(level),
        }
    }
}

/// Match against the built-in table.
pub fn match_question(text: &str, level: ReadingLevel) -> &'static str {
    ResponseTable::builtin().answer(text, level)
}
