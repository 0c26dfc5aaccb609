//! Tracker repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `trackers` rows and map them to domain values.
//! - Enforce the per-field decode contract on every row read.
//!
//! # Invariants
//! - Listing order is insertion order (rowid ascending); this is the sort
//!   order the observable store view is defined over.
//! - `get` fails on an undecodable row; `list` skips it with a logged error
//!   so one corrupt row cannot void the whole listing.

use crate::model::schedule::Schedule;
use crate::model::tracker::{Tracker, TrackerId};
use crate::repo::{ensure_connection_ready, DecodeError, RepoResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const TRACKER_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    color,
    emoji,
    schedule,
    is_pinned,
    pinned_from
FROM trackers";

/// Repository interface for tracker persistence.
pub trait TrackerRepository {
    /// Inserts a new tracker row associated with an optional category.
    fn insert(&self, tracker: &Tracker, category_id: Option<i64>) -> RepoResult<()>;
    /// Overwrites all mutable fields of an existing row. Returns `false`
    /// (not an error) when no row carries the tracker's id.
    fn update(&self, tracker: &Tracker, category_id: Option<i64>) -> RepoResult<bool>;
    /// Removes the row if present. Returns whether a row was deleted.
    fn delete(&self, id: TrackerId) -> RepoResult<bool>;
    /// Fetches one tracker; strict decode.
    fn get(&self, id: TrackerId) -> RepoResult<Option<Tracker>>;
    /// Lists all trackers in insertion order, skipping undecodable rows.
    fn list(&self) -> RepoResult<Vec<Tracker>>;
    /// Resolves the name of the category the tracker belongs to.
    fn category_name_of(&self, id: TrackerId) -> RepoResult<Option<String>>;
}

/// SQLite-backed tracker repository.
pub struct SqliteTrackerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTrackerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["trackers", "categories"])?;
        Ok(Self { conn })
    }
}

impl TrackerRepository for SqliteTrackerRepository<'_> {
    fn insert(&self, tracker: &Tracker, category_id: Option<i64>) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO trackers (
                uuid,
                name,
                color,
                emoji,
                schedule,
                is_pinned,
                pinned_from,
                category_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                tracker.id.to_string(),
                tracker.name.as_str(),
                tracker.color.as_str(),
                tracker.emoji.as_str(),
                tracker.schedule.encode(),
                bool_to_int(tracker.is_pinned),
                tracker.pinned_from.as_deref(),
                category_id,
            ],
        )?;

        Ok(())
    }

    fn update(&self, tracker: &Tracker, category_id: Option<i64>) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE trackers
             SET
                name = ?2,
                color = ?3,
                emoji = ?4,
                schedule = ?5,
                is_pinned = ?6,
                pinned_from = ?7,
                category_id = ?8
             WHERE uuid = ?1;",
            params![
                tracker.id.to_string(),
                tracker.name.as_str(),
                tracker.color.as_str(),
                tracker.emoji.as_str(),
                tracker.schedule.encode(),
                bool_to_int(tracker.is_pinned),
                tracker.pinned_from.as_deref(),
                category_id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete(&self, id: TrackerId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM trackers WHERE uuid = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }

    fn get(&self, id: TrackerId) -> RepoResult<Option<Tracker>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRACKER_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(decode_tracker_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Tracker>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRACKER_SELECT_SQL} ORDER BY rowid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut trackers = Vec::new();

        while let Some(row) = rows.next()? {
            match decode_tracker_row(row) {
                Ok(tracker) => trackers.push(tracker),
                Err(err) => {
                    warn!("event=tracker_decode module=repo status=skipped error={err}");
                }
            }
        }

        Ok(trackers)
    }

    fn category_name_of(&self, id: TrackerId) -> RepoResult<Option<String>> {
        let name = self
            .conn
            .query_row(
                "SELECT c.name
                 FROM trackers t
                 INNER JOIN categories c ON c.id = t.category_id
                 WHERE t.uuid = ?1;",
                [id.to_string()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(name)
    }
}

/// Decodes one `trackers` row into a domain value.
///
/// Required fields: id, name, color, emoji, schedule encoding. Pin state and
/// pinned-from are optional with defaults (`false` / `None`).
fn decode_tracker_row(row: &Row<'_>) -> Result<Tracker, DecodeError> {
    let uuid_text: String = row
        .get::<_, Option<String>>("uuid")
        .map_err(|_| DecodeError::MissingId)?
        .ok_or(DecodeError::MissingId)?;
    let id: TrackerId =
        Uuid::parse_str(&uuid_text).map_err(|_| DecodeError::InvalidId(uuid_text))?;

    let name: String = row
        .get::<_, Option<String>>("name")
        .map_err(|_| DecodeError::MissingName)?
        .ok_or(DecodeError::MissingName)?;
    let color: String = row
        .get::<_, Option<String>>("color")
        .map_err(|_| DecodeError::MissingColor)?
        .ok_or(DecodeError::MissingColor)?;
    let emoji: String = row
        .get::<_, Option<String>>("emoji")
        .map_err(|_| DecodeError::MissingEmoji)?
        .ok_or(DecodeError::MissingEmoji)?;
    let schedule_encoding: String = row
        .get::<_, Option<String>>("schedule")
        .map_err(|_| DecodeError::MissingSchedule)?
        .ok_or(DecodeError::MissingSchedule)?;
    let schedule = Schedule::decode(&schedule_encoding).map_err(DecodeError::InvalidSchedule)?;

    let is_pinned = row
        .get::<_, Option<i64>>("is_pinned")
        .unwrap_or(None)
        .map(|value| value != 0)
        .unwrap_or(false);
    let pinned_from: Option<String> = row.get::<_, Option<String>>("pinned_from").unwrap_or(None);

    Ok(Tracker {
        id,
        name,
        color,
        emoji,
        schedule,
        is_pinned,
        pinned_from,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
