//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose stable, use-case-level tracker/category/completion functions to
//!   the UI runtime via FRB.
//! - Keep error semantics simple: success envelopes with message strings.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as ISO `YYYY-MM-DD` strings, ids as UUID text.

use chrono::NaiveDate;
use habitline_core::db::open_db;
use habitline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CategoryStore, RecordStore, Schedule, SqliteCategoryRepository, SqliteRecordRepository,
    SqliteTrackerRepository, Tracker, TrackerId, TrackerStore, WeekDay,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "habitline.sqlite3";
const DATE_FORMAT: &str = "%Y-%m-%d";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

type SqliteTrackerStore<'conn> = TrackerStore<
    SqliteTrackerRepository<'conn>,
    SqliteCategoryRepository<'conn>,
    SqliteRecordRepository<'conn>,
>;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking; never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; reconfiguration attempts
///   return an error message.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Tracker shape crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerDto {
    /// Stable tracker id in UUID text form.
    pub id: String,
    pub name: String,
    /// `#RRGGBB` hex color.
    pub color: String,
    pub emoji: String,
    /// Weekday tokens (`Monday`...`Sunday`), empty for one-off trackers.
    pub schedule: Vec<String>,
    pub is_pinned: bool,
    pub pinned_from: Option<String>,
    /// Resolved category name; empty when uncategorized.
    pub category_name: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Lists all trackers in the store's defined order.
///
/// # FFI contract
/// - Sync call, DB-backed execution; never panics.
/// - Returns an empty list when the store cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_list() -> Vec<TrackerDto> {
    let mut items = Vec::new();
    let _ = with_tracker_store(|store| {
        items = store
            .current_trackers()
            .iter()
            .map(|tracker| to_tracker_dto(tracker, store))
            .collect();
        Ok(())
    });
    items
}

/// Creates a new tracker under the given category.
///
/// # FFI contract
/// - `schedule` carries weekday tokens; unknown tokens fail the call.
/// - Never panics; returns the new tracker id in the success message.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add(
    name: String,
    color: String,
    emoji: String,
    schedule: Vec<String>,
    category_name: Option<String>,
) -> ActionResponse {
    let schedule = match parse_schedule(&schedule) {
        Ok(schedule) => schedule,
        Err(message) => return ActionResponse::failure(message),
    };

    let tracker = Tracker::new(name, color, emoji, schedule);
    let id = tracker.id.to_string();
    match with_tracker_store(|store| store.add(&tracker, category_name.as_deref())) {
        Ok(()) => ActionResponse::success(id),
        Err(err) => ActionResponse::failure(format!("tracker_add failed: {err}")),
    }
}

/// Overwrites an existing tracker's fields and category.
///
/// A missing tracker id is a silent no-op, mirroring core semantics.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn tracker_update(
    id: String,
    name: String,
    color: String,
    emoji: String,
    schedule: Vec<String>,
    is_pinned: bool,
    pinned_from: Option<String>,
    category_name: Option<String>,
) -> ActionResponse {
    let tracker_id = match parse_tracker_id(&id) {
        Ok(tracker_id) => tracker_id,
        Err(message) => return ActionResponse::failure(message),
    };
    let schedule = match parse_schedule(&schedule) {
        Ok(schedule) => schedule,
        Err(message) => return ActionResponse::failure(message),
    };

    let mut tracker = Tracker::with_id(tracker_id, name, color, emoji, schedule);
    tracker.is_pinned = is_pinned;
    tracker.pinned_from = pinned_from;

    match with_tracker_store(|store| store.update(&tracker, category_name.as_deref())) {
        Ok(()) => ActionResponse::success("Tracker updated."),
        Err(err) => ActionResponse::failure(format!("tracker_update failed: {err}")),
    }
}

/// Deletes a tracker and all of its completion records.
///
/// Deletion is best-effort in core; this call only fails when the id is
/// malformed or the store cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_delete(id: String) -> ActionResponse {
    let tracker_id = match parse_tracker_id(&id) {
        Ok(tracker_id) => tracker_id,
        Err(message) => return ActionResponse::failure(message),
    };

    match with_tracker_store(|store| {
        store.delete(tracker_id);
        Ok(())
    }) {
        Ok(()) => ActionResponse::success("Tracker deleted."),
        Err(err) => ActionResponse::failure(format!("tracker_delete failed: {err}")),
    }
}

/// Resolved category name for a tracker; empty when uncategorized.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_category_name(id: String) -> String {
    let Ok(tracker_id) = parse_tracker_id(&id) else {
        return String::new();
    };

    let mut name = String::new();
    let _ = with_tracker_store(|store| {
        name = store.category_name_for(tracker_id);
        Ok(())
    });
    name
}

/// Flips the completion state for the tracker on the given date.
///
/// Returns `ok=true` with message `completed` or `cleared`.
#[flutter_rust_bridge::frb(sync)]
pub fn completion_toggle(id: String, date: String) -> ActionResponse {
    let (tracker_id, day) = match parse_completion_key(&id, &date) {
        Ok(parsed) => parsed,
        Err(message) => return ActionResponse::failure(message),
    };

    match with_record_store(|records| records.toggle(tracker_id, day)) {
        Ok(true) => ActionResponse::success("completed"),
        Ok(false) => ActionResponse::success("cleared"),
        Err(err) => ActionResponse::failure(format!("completion_toggle failed: {err}")),
    }
}

/// Whether the tracker is marked complete on the given date.
#[flutter_rust_bridge::frb(sync)]
pub fn completion_state(id: String, date: String) -> bool {
    let Ok((tracker_id, day)) = parse_completion_key(&id, &date) else {
        return false;
    };

    with_record_store(|records| records.is_completed(tracker_id, day)).unwrap_or(false)
}

/// Number of completed days for the tracker (the "N days" counter).
#[flutter_rust_bridge::frb(sync)]
pub fn completion_count(id: String) -> u32 {
    let Ok(tracker_id) = parse_tracker_id(&id) else {
        return 0;
    };

    with_record_store(|records| records.completed_days(tracker_id)).unwrap_or(0)
}

/// Lists user-visible categories (pinned pseudo-category excluded).
#[flutter_rust_bridge::frb(sync)]
pub fn category_list() -> Vec<String> {
    with_category_store(|categories| {
        Ok(categories
            .user_categories()?
            .into_iter()
            .map(|category| category.name)
            .collect())
    })
    .unwrap_or_default()
}

/// Creates a category by name. Idempotent.
#[flutter_rust_bridge::frb(sync)]
pub fn category_add(name: String) -> ActionResponse {
    match with_category_store(|categories| categories.add(name.trim())) {
        Ok(()) => ActionResponse::success("Category created."),
        Err(err) => ActionResponse::failure(format!("category_add failed: {err}")),
    }
}

fn to_tracker_dto(tracker: &Tracker, store: &SqliteTrackerStore<'_>) -> TrackerDto {
    TrackerDto {
        id: tracker.id.to_string(),
        name: tracker.name.clone(),
        color: tracker.color.clone(),
        emoji: tracker.emoji.clone(),
        schedule: tracker
            .schedule
            .days()
            .iter()
            .map(|day| day.as_token().to_string())
            .collect(),
        is_pinned: tracker.is_pinned,
        pinned_from: tracker.pinned_from.clone(),
        category_name: store.category_name_for(tracker.id),
    }
}

fn parse_tracker_id(raw: &str) -> Result<TrackerId, String> {
    Uuid::parse_str(raw).map_err(|_| format!("malformed tracker id `{raw}`"))
}

fn parse_schedule(tokens: &[String]) -> Result<Schedule, String> {
    let mut days = Vec::with_capacity(tokens.len());
    for token in tokens {
        let day = WeekDay::from_token(token)
            .ok_or_else(|| format!("unknown weekday token `{token}`"))?;
        days.push(day);
    }
    Ok(Schedule::from_days(days))
}

fn parse_completion_key(id: &str, date: &str) -> Result<(TrackerId, NaiveDate), String> {
    let tracker_id = parse_tracker_id(id)?;
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| format!("malformed date `{date}`, expected YYYY-MM-DD"))?;
    Ok((tracker_id, day))
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("HABITLINE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_tracker_store(
    f: impl FnOnce(&mut SqliteTrackerStore<'_>) -> habitline_core::RepoResult<()>,
) -> Result<(), String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let mut store = TrackerStore::try_new(
        SqliteTrackerRepository::try_new(&conn).map_err(|err| err.to_string())?,
        SqliteCategoryRepository::try_new(&conn).map_err(|err| err.to_string())?,
        SqliteRecordRepository::try_new(&conn).map_err(|err| err.to_string())?,
    )
    .map_err(|err| err.to_string())?;
    f(&mut store).map_err(|err| err.to_string())
}

fn with_record_store<T>(
    f: impl FnOnce(&RecordStore<SqliteRecordRepository<'_>>) -> habitline_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let store =
        RecordStore::new(SqliteRecordRepository::try_new(&conn).map_err(|err| err.to_string())?);
    f(&store).map_err(|err| err.to_string())
}

fn with_category_store<T>(
    f: impl FnOnce(&CategoryStore<SqliteCategoryRepository<'_>>) -> habitline_core::RepoResult<T>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("DB open failed: {err}"))?;
    let store =
        CategoryStore::new(SqliteCategoryRepository::try_new(&conn).map_err(|err| err.to_string())?);
    f(&store).map_err(|err| err.to_string())
}
