//! Tracker domain model.
//!
//! # Responsibility
//! - Define the canonical habit record shared by list/edit/statistics views.
//! - Define category and completion-record value types.
//!
//! # Invariants
//! - `id` is stable and never reused for another tracker.
//! - `pinned_from` is meaningful only while `is_pinned` is true; it names the
//!   category the tracker should return to on unpin.

use crate::model::schedule::Schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tracker.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TrackerId = Uuid;

/// Name of the reserved pseudo-category holding pinned trackers.
///
/// Resolved like any other category internally but hidden from user-facing
/// category listings.
pub const PINNED_CATEGORY_NAME: &str = "Pinned";

/// A user-defined habit with a weekly recurrence schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    /// Stable global ID used for completion records and category lookups.
    pub id: TrackerId,
    /// Display name.
    pub name: String,
    /// Card color as a `#RRGGBB` hex string.
    pub color: String,
    /// Single emoji shown on the tracker card.
    pub emoji: String,
    /// Weekdays the habit recurs on; empty for single-occurrence trackers.
    pub schedule: Schedule,
    /// Whether the tracker currently sits in the pinned pseudo-category.
    pub is_pinned: bool,
    /// Category the tracker was pinned from, used to restore it on unpin.
    pub pinned_from: Option<String>,
}

impl Tracker {
    /// Creates a tracker with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        emoji: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, color, emoji, schedule)
    }

    /// Creates a tracker with a caller-provided stable ID.
    ///
    /// Used by edit/import paths where identity already exists.
    pub fn with_id(
        id: TrackerId,
        name: impl Into<String>,
        color: impl Into<String>,
        emoji: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            emoji: emoji.into(),
            schedule,
            is_pinned: false,
            pinned_from: None,
        }
    }

    /// Moves the tracker into the pinned pseudo-category, remembering where
    /// it came from.
    pub fn pin(&mut self, from_category: impl Into<String>) {
        self.is_pinned = true;
        self.pinned_from = Some(from_category.into());
    }

    /// Returns the tracker to its pre-pin state and yields the category name
    /// it should be restored into, if one was recorded.
    pub fn unpin(&mut self) -> Option<String> {
        self.is_pinned = false;
        self.pinned_from.take()
    }
}

/// A named grouping of trackers. `name` is the unique lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether this is the reserved pinned pseudo-category.
    pub fn is_pinned_category(&self) -> bool {
        self.name == PINNED_CATEGORY_NAME
    }
}

/// Evidence that a tracker was performed on a specific calendar date.
///
/// At most one record per `(tracker_id, date)` pair is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub tracker_id: TrackerId,
    pub date: NaiveDate,
}

impl CompletionRecord {
    pub fn new(tracker_id: TrackerId, date: NaiveDate) -> Self {
        Self { tracker_id, date }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Tracker, PINNED_CATEGORY_NAME};
    use crate::model::schedule::{Schedule, WeekDay};

    #[test]
    fn new_tracker_starts_unpinned() {
        let tracker = Tracker::new("Run", "#3772FF", "🏃", Schedule::empty());
        assert!(!tracker.is_pinned);
        assert!(tracker.pinned_from.is_none());
    }

    #[test]
    fn pin_then_unpin_restores_origin_category() {
        let mut tracker = Tracker::new(
            "Read",
            "#FD4C49",
            "📚",
            Schedule::from_days([WeekDay::Sunday]),
        );
        tracker.pin("Leisure");
        assert!(tracker.is_pinned);

        let restored = tracker.unpin();
        assert_eq!(restored.as_deref(), Some("Leisure"));
        assert!(!tracker.is_pinned);
        assert!(tracker.pinned_from.is_none());
    }

    #[test]
    fn pinned_category_is_recognized() {
        assert!(Category::new(PINNED_CATEGORY_NAME).is_pinned_category());
        assert!(!Category::new("Sport").is_pinned_category());
    }
}
