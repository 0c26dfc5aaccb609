//! Completion-record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist (tracker, date) completion facts.
//!
//! # Invariants
//! - The table's composite primary key guarantees at most one row per
//!   (tracker, date); duplicate adds are ignored, never double-counted.
//! - Dates persist as ISO `YYYY-MM-DD` text, which sorts chronologically.

use crate::model::tracker::{CompletionRecord, TrackerId};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository interface for completion-record persistence.
pub trait RecordRepository {
    /// Adds a completion fact. Returns `false` when it was already present.
    fn add(&self, record: CompletionRecord) -> RepoResult<bool>;
    /// Removes a completion fact. Returns whether a row was deleted.
    fn remove(&self, record: CompletionRecord) -> RepoResult<bool>;
    /// Whether the tracker is marked complete on the given date.
    fn is_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<bool>;
    /// All completion facts for a tracker in chronological order.
    fn for_tracker(&self, tracker_id: TrackerId) -> RepoResult<Vec<CompletionRecord>>;
    /// Number of completed days for a tracker (the "N days" counter).
    fn count_for_tracker(&self, tracker_id: TrackerId) -> RepoResult<u32>;
    /// Removes every completion fact for a tracker; returns how many.
    fn delete_all_for_tracker(&self, tracker_id: TrackerId) -> RepoResult<usize>;
}

/// SQLite-backed completion-record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["completion_records"])?;
        Ok(Self { conn })
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn add(&self, record: CompletionRecord) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO completion_records (tracker_uuid, completed_on)
             VALUES (?1, ?2);",
            params![
                record.tracker_id.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(inserted > 0)
    }

    fn remove(&self, record: CompletionRecord) -> RepoResult<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM completion_records
             WHERE tracker_uuid = ?1 AND completed_on = ?2;",
            params![
                record.tracker_id.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
            ],
        )?;
        Ok(deleted > 0)
    }

    fn is_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM completion_records
                WHERE tracker_uuid = ?1 AND completed_on = ?2
            );",
            params![
                tracker_id.to_string(),
                date.format(DATE_FORMAT).to_string(),
            ],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn for_tracker(&self, tracker_id: TrackerId) -> RepoResult<Vec<CompletionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT completed_on FROM completion_records
             WHERE tracker_uuid = ?1
             ORDER BY completed_on ASC;",
        )?;

        let mut rows = stmt.query([tracker_id.to_string()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            let date = NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|_| {
                RepoError::InvalidData(format!(
                    "malformed completion date `{raw}` in completion_records.completed_on"
                ))
            })?;
            records.push(CompletionRecord::new(tracker_id, date));
        }

        Ok(records)
    }

    fn count_for_tracker(&self, tracker_id: TrackerId) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM completion_records WHERE tracker_uuid = ?1;",
            [tracker_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn delete_all_for_tracker(&self, tracker_id: TrackerId) -> RepoResult<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM completion_records WHERE tracker_uuid = ?1;",
            [tracker_id.to_string()],
        )?;
        Ok(deleted)
    }
}
