//! Observable tracker store.
//!
//! # Responsibility
//! - Orchestrate tracker/category/record repositories into the use-case API
//!   the UI talks to (add/update/delete/list, category resolution).
//! - Maintain the live, insertion-ordered tracker view and push a structural
//!   diff to every subscriber after each mutation batch.
//!
//! # Invariants
//! - Exactly one `TrackerStoreUpdate` is delivered per mutation batch, to
//!   every subscriber, synchronously on the mutating call.
//! - Create/update surface save failures; deletion paths are best-effort and
//!   swallow them with a logged error.

use crate::model::tracker::{Tracker, TrackerId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::record_repo::RecordRepository;
use crate::repo::tracker_repo::TrackerRepository;
use crate::repo::RepoResult;
use log::{debug, error, warn};
use std::collections::HashMap;

/// Category name looked up when a caller passes no category at all.
///
/// Kept from the legacy app verbatim: the lookup virtually always misses and
/// the tracker ends up uncategorized. Preserved because the UI relies on the
/// resulting empty category name; see DESIGN.md.
const FALLBACK_CATEGORY_NAME: &str = "Error category";

/// One identity that kept existing but changed ordinal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexMove {
    pub from: usize,
    pub to: usize,
}

/// Structural diff between two successive snapshots of the tracker list.
///
/// Positions are indexes into the snapshot the change applies to: `deleted`
/// and `moved.from` refer to the previous snapshot, `inserted`, `updated`
/// and `moved.to` to the new one. Index vectors are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerStoreUpdate {
    pub inserted: Vec<usize>,
    pub deleted: Vec<usize>,
    pub updated: Vec<usize>,
    pub moved: Vec<IndexMove>,
}

impl TrackerStoreUpdate {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.deleted.is_empty()
            && self.updated.is_empty()
            && self.moved.is_empty()
    }
}

type UpdateHandler = Box<dyn Fn(&TrackerStoreUpdate)>;

/// Observable, insertion-ordered view over persisted trackers.
///
/// The store loads its snapshot once at construction and refreshes it after
/// every mutation, so `current_trackers` never touches storage on the hot
/// read path the UI scrolls over.
pub struct TrackerStore<T, C, R>
where
    T: TrackerRepository,
    C: CategoryRepository,
    R: RecordRepository,
{
    trackers: T,
    categories: C,
    records: R,
    snapshot: Vec<Tracker>,
    subscribers: Vec<UpdateHandler>,
}

impl<T, C, R> TrackerStore<T, C, R>
where
    T: TrackerRepository,
    C: CategoryRepository,
    R: RecordRepository,
{
    /// Creates the store and performs the initial fetch.
    pub fn try_new(trackers: T, categories: C, records: R) -> RepoResult<Self> {
        let snapshot = trackers.list()?;
        Ok(Self {
            trackers,
            categories,
            records,
            snapshot,
            subscribers: Vec::new(),
        })
    }

    /// Registers a diff subscriber. Every subscriber receives every update.
    pub fn subscribe(&mut self, handler: impl Fn(&TrackerStoreUpdate) + 'static) {
        self.subscribers.push(Box::new(handler));
    }

    /// The current ordered snapshot of all trackers.
    pub fn current_trackers(&self) -> &[Tracker] {
        &self.snapshot
    }

    /// Persists a new tracker under the given category.
    ///
    /// Save failures are surfaced to the caller.
    pub fn add(&mut self, tracker: &Tracker, category_name: Option<&str>) -> RepoResult<()> {
        let category_id = self.resolve_category(category_name)?;
        self.trackers.insert(tracker, category_id)?;
        self.refresh_and_notify(None);
        Ok(())
    }

    /// Overwrites all mutable fields of an existing tracker and re-resolves
    /// its category. A missing tracker id is a silent no-op.
    ///
    /// A rewrite that leaves every field identical still reports the
    /// tracker's position as updated, so list cells re-render after an edit.
    pub fn update(&mut self, tracker: &Tracker, category_name: Option<&str>) -> RepoResult<()> {
        let category_id = self.resolve_category(category_name)?;
        let existed = self.trackers.update(tracker, category_id)?;
        if !existed {
            debug!(
                "event=tracker_update module=store status=noop tracker_id={}",
                tracker.id
            );
            return Ok(());
        }

        self.refresh_and_notify(Some(tracker.id));
        Ok(())
    }

    /// Removes the tracker and all of its completion records.
    ///
    /// Deleting a nonexistent id is a no-op, not an error. Both deletes are
    /// best-effort: storage failures are logged and swallowed.
    pub fn delete(&mut self, id: TrackerId) {
        self.delete_all_completions(id);

        match self.trackers.delete(id) {
            Ok(true) => self.refresh_and_notify(None),
            Ok(false) => {
                debug!("event=tracker_delete module=store status=noop tracker_id={id}");
            }
            Err(err) => {
                error!(
                    "event=tracker_delete module=store status=swallowed tracker_id={id} error={err}"
                );
            }
        }
    }

    /// Removes every completion record for the tracker (best-effort).
    pub fn delete_all_completions(&mut self, id: TrackerId) {
        match self.records.delete_all_for_tracker(id) {
            Ok(deleted) => {
                debug!(
                    "event=record_purge module=store status=ok tracker_id={id} deleted={deleted}"
                );
            }
            Err(err) => {
                error!(
                    "event=record_purge module=store status=swallowed tracker_id={id} error={err}"
                );
            }
        }
    }

    /// Name of the category the tracker belongs to, or the empty string when
    /// the tracker or its category cannot be resolved.
    pub fn category_name_for(&self, id: TrackerId) -> String {
        match self.trackers.category_name_of(id) {
            Ok(Some(name)) => name,
            Ok(None) => String::new(),
            Err(err) => {
                warn!(
                    "event=category_lookup module=store status=swallowed tracker_id={id} error={err}"
                );
                String::new()
            }
        }
    }

    /// Resolves a caller-supplied category name to a row id.
    ///
    /// `None` falls back to `FALLBACK_CATEGORY_NAME`; an unknown name leaves
    /// the tracker uncategorized and logs the miss.
    fn resolve_category(&self, category_name: Option<&str>) -> RepoResult<Option<i64>> {
        let requested = category_name.unwrap_or(FALLBACK_CATEGORY_NAME);
        let resolved = self.categories.find_id(requested)?;
        if resolved.is_none() {
            warn!("event=category_resolve module=store status=miss name={requested}");
        }
        Ok(resolved)
    }

    /// Reloads the snapshot, diffs it against the previous one and delivers
    /// the update to every subscriber.
    ///
    /// `touched` forces that tracker's position into `updated` when the value
    /// diff alone sees no change (field-identical rewrite).
    fn refresh_and_notify(&mut self, touched: Option<TrackerId>) {
        let next = match self.trackers.list() {
            Ok(next) => next,
            Err(err) => {
                error!("event=tracker_refresh module=store status=error error={err}");
                return;
            }
        };

        let mut update = diff_snapshots(&self.snapshot, &next);
        if update.is_empty() {
            if let Some(id) = touched {
                if let Some(position) = next.iter().position(|tracker| tracker.id == id) {
                    update.updated.push(position);
                }
            }
        }

        self.snapshot = next;
        for subscriber in &self.subscribers {
            subscriber(&update);
        }
    }
}

/// Computes the structural diff between two ordered snapshots.
///
/// - `deleted`: ids present only in `old`, at their old positions.
/// - `inserted`: ids present only in `new`, at their new positions.
/// - `moved`: ids present in both at different positions.
/// - `updated`: ids present in both at the same position with changed fields.
pub fn diff_snapshots(old: &[Tracker], new: &[Tracker]) -> TrackerStoreUpdate {
    let old_positions: HashMap<TrackerId, usize> = old
        .iter()
        .enumerate()
        .map(|(position, tracker)| (tracker.id, position))
        .collect();
    let new_positions: HashMap<TrackerId, usize> = new
        .iter()
        .enumerate()
        .map(|(position, tracker)| (tracker.id, position))
        .collect();

    let mut update = TrackerStoreUpdate::default();

    for (position, tracker) in old.iter().enumerate() {
        if !new_positions.contains_key(&tracker.id) {
            update.deleted.push(position);
        }
    }

    for (position, tracker) in new.iter().enumerate() {
        match old_positions.get(&tracker.id) {
            None => update.inserted.push(position),
            Some(&old_position) if old_position != position => {
                update.moved.push(IndexMove {
                    from: old_position,
                    to: position,
                });
            }
            Some(&old_position) => {
                if old[old_position] != *tracker {
                    update.updated.push(position);
                }
            }
        }
    }

    update
}

#[cfg(test)]
mod tests {
    use super::{diff_snapshots, IndexMove};
    use crate::model::schedule::Schedule;
    use crate::model::tracker::Tracker;

    fn tracker(name: &str) -> Tracker {
        Tracker::new(name, "#FD4C49", "🙂", Schedule::empty())
    }

    #[test]
    fn identical_snapshots_diff_to_empty() {
        let snapshot = vec![tracker("a"), tracker("b")];
        assert!(diff_snapshots(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn appended_tracker_is_reported_inserted_at_tail() {
        let old = vec![tracker("a")];
        let mut new = old.clone();
        new.push(tracker("b"));

        let update = diff_snapshots(&old, &new);
        assert_eq!(update.inserted, vec![1]);
        assert!(update.deleted.is_empty());
    }

    #[test]
    fn removed_tracker_reports_old_position_and_shift_as_move() {
        let old = vec![tracker("a"), tracker("b"), tracker("c")];
        let new = vec![old[0].clone(), old[2].clone()];

        let update = diff_snapshots(&old, &new);
        assert_eq!(update.deleted, vec![1]);
        assert_eq!(update.moved, vec![IndexMove { from: 2, to: 1 }]);
    }

    #[test]
    fn field_change_in_place_is_an_update() {
        let old = vec![tracker("a"), tracker("b")];
        let mut new = old.clone();
        new[1].name = "b2".to_string();

        let update = diff_snapshots(&old, &new);
        assert_eq!(update.updated, vec![1]);
        assert!(update.moved.is_empty());
    }

    #[test]
    fn swap_reports_two_moves() {
        let old = vec![tracker("a"), tracker("b")];
        let new = vec![old[1].clone(), old[0].clone()];

        let update = diff_snapshots(&old, &new);
        assert_eq!(
            update.moved,
            vec![IndexMove { from: 1, to: 0 }, IndexMove { from: 0, to: 1 }]
        );
        assert!(update.updated.is_empty());
    }
}
