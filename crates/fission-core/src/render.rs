//! Which parts of an event are shown at each reading level.
//!
//! `present` is a pure function of the event and the level; front ends call it
//! on every draw and lay the result out however they like.

use std::borrow::Cow;

use crate::reading_level::ReadingLevel;
use crate::timeline::{Category, NotableFigure, Source, TimelineEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<B> {
    pub heading: &'static str,
    pub body: B,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView<'a> {
    pub title: &'a str,
    pub year: i32,
    pub category: Category,
    pub description: Cow<'a, str>,
    pub impact: Option<Section<Cow<'a, str>>>,
    pub figures: Option<Section<&'a [NotableFigure]>>,
    pub sources: Option<Section<&'a [Source]>>,
    pub details: Option<Section<&'a str>>,
}

/// First sentence of `text`: everything before the first `.`, with the period
/// put back. Abbreviations such as "U.S." cut the sentence short.
pub fn first_sentence(text: &str) -> String {
    let head = text.split('.').next().unwrap_or_default();
    format!("{}.", head)
}

pub fn present(event: &TimelineEvent, level: ReadingLevel) -> EventView<'_> {
    let simplify = |text: &'static str| -> Cow<'static, str> {
        if level == ReadingLevel::Kids {
            Cow::Owned(first_sentence(text))
        } else {
            Cow::Borrowed(text)
        }
    };

    let impact = event.impact.map(|text| Section {
        heading: if level == ReadingLevel::Kids {
            "Why This Matters"
        } else {
            "Impact"
        },
        body: simplify(text),
    });

    let figures = if level.shows_figures() && !event.notable_figures.is_empty() {
        Some(Section {
            heading: if level == ReadingLevel::Novice {
                "Key People"
            } else {
                "Notable Figures"
            },
            body: event.notable_figures,
        })
    } else {
        None
    };

    let sources = if level.shows_sources() && !event.sources.is_empty() {
        Some(Section {
            heading: "Sources",
            body: event.sources,
        })
    } else {
        None
    };

    let details = match (level, event.details) {
        (ReadingLevel::Expert, Some(text)) => Some(Section {
            heading: "In Depth",
            body: text,
        }),
        _ => None,
    };

    EventView {
        title: event.title,
        year: event.year,
        category: event.category,
        description: simplify(event.description),
        impact,
        figures,
        sources,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIGURES: &[NotableFigure] = &[NotableFigure {
        name: "Enrico Fermi",
        role: Some("Physicist"),
        description: None,
    }];

    static SOURCES: &[Source] = &[Source {
        title: "Chicago Pile-1 lab notes",
        url: None,
    }];

    fn full_event() -> TimelineEvent {
        TimelineEvent {
            id: "pile",
            year: 1942,
            title: "First Nuclear Reactor",
            description: "Fermi's team starts a chain reaction. It runs for minutes. Then it is stopped.",
            category: Category::Technology,
            impact: Some("Reactors become possible. Power plants follow."),
            details: Some("A squash court under the stands."),
            notable_figures: FIGURES,
            sources: SOURCES,
        }
    }

    fn bare_event() -> TimelineEvent {
        TimelineEvent {
            impact: None,
            details: None,
            notable_figures: &[],
            sources: &[],
            ..full_event()
        }
    }

    #[test]
    fn test_first_sentence() {
        assert_eq!(first_sentence("One. Two. Three."), "One.");
        assert_eq!(first_sentence("No period"), "No period.");
        assert_eq!(first_sentence(""), ".");
        assert_eq!(first_sentence("The U.S. acts."), "The U.");
    }

    #[test]
    fn test_kids_sees_first_sentences_only() {
        let event = full_event();
        let view = present(&event, ReadingLevel::Kids);
        assert_eq!(view.description, "Fermi's team starts a chain reaction.");
        let impact = view.impact.unwrap();
        assert_eq!(impact.heading, "Why This Matters");
        assert_eq!(impact.body, "Reactors become possible.");
        assert!(view.figures.is_none());
        assert!(view.sources.is_none());
        assert!(view.details.is_none());
    }

    #[test]
    fn test_college_sees_full_description() {
        let event = full_event();
        let view = present(&event, ReadingLevel::College);
        assert_eq!(view.description, event.description);
        assert_eq!(view.impact.unwrap().body, event.impact.unwrap());
    }

    #[test]
    fn test_optional_fields_by_level() {
        // (level, impact, figures heading, sources, details) for an event with every field
        let cases = [
            (ReadingLevel::Kids, true, None, false, false),
            (ReadingLevel::Novice, true, Some("Key People"), false, false),
            (ReadingLevel::College, true, Some("Notable Figures"), true, false),
            (ReadingLevel::Expert, true, Some("Notable Figures"), true, true),
        ];
        let event = full_event();
        for (level, impact, figures, sources, details) in cases {
            let view = present(&event, level);
            assert_eq!(view.impact.is_some(), impact, "{:?} impact", level);
            assert_eq!(view.figures.as_ref().map(|s| s.heading), figures, "{:?} figures", level);
            assert_eq!(view.sources.is_some(), sources, "{:?} sources", level);
            assert_eq!(view.details.is_some(), details, "{:?} details", level);
        }
    }

    #[test]
    fn test_absent_fields_never_render() {
        let event = bare_event();
        for level in ReadingLevel::all() {
            let view = present(&event, level);
            assert!(view.impact.is_none());
            assert!(view.figures.is_none());
            assert!(view.sources.is_none());
            assert!(view.details.is_none());
        }
    }

    #[test]
    fn test_sources_only_for_academic_levels_on_real_data() {
        let event = crate::timeline::find_event("discovery-of-fission").unwrap();
        assert!(present(event, ReadingLevel::Kids).sources.is_none());
        assert!(present(event, ReadingLevel::Novice).sources.is_none());
        assert_eq!(present(event, ReadingLevel::College).sources.unwrap().body.len(), 1);
        assert_eq!(present(event, ReadingLevel::Expert).sources.unwrap().body.len(), 1);
    }
}
