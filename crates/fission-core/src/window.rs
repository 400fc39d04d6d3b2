//! Visible window over the year-sorted timeline.
//!
//! Selection is tracked as a canonical index (position in the dataset as
//! authored) while the window bounds index into the year-sorted view. The two
//! only coincide when the dataset happens to be authored in year order.

use crate::timeline::TimelineEvent;
use tracing::debug;

/// Number of events visible when the navigator first opens.
pub const INITIAL_SPAN: usize = 6;

/// Inclusive bounds into the year-sorted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

/// One slot of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleEntry {
    pub sorted_position: usize,
    pub canonical_index: usize,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct TimelineWindow {
    /// sorted position -> canonical index
    sorted: Vec<usize>,
    selected: usize,
    range: VisibleRange,
}

impl TimelineWindow {
    pub fn new(events: &[TimelineEvent]) -> Self {
        Self::from_years(events.iter().map(|e| e.year))
    }

    pub fn from_years(years: impl IntoIterator<Item = i32>) -> Self {
        let years: Vec<i32> = years.into_iter().collect();
        let mut sorted: Vec<usize> = (0..years.len()).collect();
        // Stable, so equal years keep their authored order
        sorted.sort_by_key(|&i| years[i]);

        let last = sorted.len().saturating_sub(1);
        Self {
            sorted,
            selected: 0,
            range: VisibleRange {
                start: 0,
                end: (INITIAL_SPAN - 1).min(last),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.sorted.len().saturating_sub(1)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn range(&self) -> VisibleRange {
        self.range
    }

    pub fn sorted_position(&self, canonical: usize) -> Option<usize> {
        self.sorted.iter().position(|&i| i == canonical)
    }

    /// Select an event by canonical index, shifting the window if the event
    /// lies outside it. Returns false (and changes nothing) for an unknown index.
    pub fn select_event(&mut self, canonical: usize) -> bool {
        let Some(pos) = self.sorted_position(canonical) else {
            return false;
        };
        self.selected = canonical;

        let last = self.last_index();
        if pos < self.range.start {
            self.range = VisibleRange {
                start: pos.saturating_sub(2),
                end: (pos + 3).min(last),
            };
            debug!(pos, range = ?self.range, "window shifted left to selection");
        } else if pos > self.range.end {
            self.range = VisibleRange {
                start: pos.saturating_sub(3),
                end: (pos + 2).min(last),
            };
            debug!(pos, range = ?self.range, "window shifted right to selection");
        }
        true
    }

    /// Move the selection to the next event in year order.
    pub fn select_next(&mut self) -> bool {
        match self.sorted_position(self.selected) {
            Some(pos) if pos < self.last_index() => self.select_event(self.sorted[pos + 1]),
            _ => false,
        }
    }

    /// Move the selection to the previous event in year order.
    pub fn select_previous(&mut self) -> bool {
        match self.sorted_position(self.selected) {
            Some(pos) if pos > 0 => self.select_event(self.sorted[pos - 1]),
            _ => false,
        }
    }

    pub fn select_first(&mut self) -> bool {
        match self.sorted.first() {
            Some(&canonical) => self.select_event(canonical),
            None => false,
        }
    }

    pub fn select_last(&mut self) -> bool {
        match self.sorted.last() {
            Some(&canonical) => self.select_event(canonical),
            None => false,
        }
    }

    pub fn can_scroll_left(&self) -> bool {
        self.range.start > 0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.range.end < self.last_index()
    }

    pub fn scroll_left(&mut self) {
        if self.can_scroll_left() {
            self.range.start -= 1;
            self.range.end -= 1;
        }
    }

    pub fn scroll_right(&mut self) {
        if self.can_scroll_right() {
            self.range.start += 1;
            self.range.end += 1;
        }
    }

    /// The navigator slots currently in view, in year order.
    pub fn visible(&self) -> Vec<VisibleEntry> {
        if self.sorted.is_empty() {
            return Vec::new();
        }
        (self.range.start..=self.range.end)
            .map(|pos| {
                let canonical_index = self.sorted[pos];
                VisibleEntry {
                    sorted_position: pos,
                    canonical_index,
                    selected: canonical_index == self.selected,
                }
            })
            .collect()
    }
}
