//! Completion-record store.
//!
//! # Responsibility
//! - Provide the day-toggle and statistics API over completion facts.
//!
//! # Invariants
//! - Toggling the same (tracker, date) twice restores the original state.
//! - Counts never double-count a day; the repository ignores duplicates.

use crate::model::tracker::{CompletionRecord, TrackerId};
use crate::repo::record_repo::RecordRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;

/// Use-case wrapper over completion-record persistence.
pub struct RecordStore<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Marks the tracker complete on the date. Idempotent.
    pub fn mark_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<()> {
        self.repo.add(CompletionRecord::new(tracker_id, date))?;
        Ok(())
    }

    /// Clears the completion for the date. Idempotent.
    pub fn unmark_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<()> {
        self.repo.remove(CompletionRecord::new(tracker_id, date))?;
        Ok(())
    }

    /// Flips the completion state for the date and returns the new state.
    pub fn toggle(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<bool> {
        if self.repo.is_completed(tracker_id, date)? {
            self.repo.remove(CompletionRecord::new(tracker_id, date))?;
            Ok(false)
        } else {
            self.repo.add(CompletionRecord::new(tracker_id, date))?;
            Ok(true)
        }
    }

    /// Whether the tracker is marked complete on the date.
    pub fn is_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<bool> {
        self.repo.is_completed(tracker_id, date)
    }

    /// All completions for the tracker in chronological order.
    pub fn completions(&self, tracker_id: TrackerId) -> RepoResult<Vec<CompletionRecord>> {
        self.repo.for_tracker(tracker_id)
    }

    /// Number of completed days, shown as the "N days" counter label.
    pub fn completed_days(&self, tracker_id: TrackerId) -> RepoResult<u32> {
        self.repo.count_for_tracker(tracker_id)
    }
}
