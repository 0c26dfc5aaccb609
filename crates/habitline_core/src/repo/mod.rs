//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for trackers, categories
//!   and completion records.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repository constructors verify schema readiness before first use.
//! - Read paths surface semantic decode errors instead of masking bad rows;
//!   listing policy (skip vs abort) belongs to the caller-facing docs of each
//!   listing method.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_repo;
pub mod record_repo;
pub mod tracker_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised when a persisted tracker row violates the decode contract.
///
/// Every required field has its own variant so callers can report exactly
/// which column went missing or bad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    MissingId,
    MissingName,
    MissingColor,
    MissingEmoji,
    MissingSchedule,
    InvalidId(String),
    InvalidSchedule(crate::model::schedule::UnknownWeekdayToken),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId => write!(f, "tracker row has no id"),
            Self::MissingName => write!(f, "tracker row has no name"),
            Self::MissingColor => write!(f, "tracker row has no color"),
            Self::MissingEmoji => write!(f, "tracker row has no emoji"),
            Self::MissingSchedule => write!(f, "tracker row has no schedule encoding"),
            Self::InvalidId(raw) => write!(f, "tracker row has malformed id `{raw}`"),
            Self::InvalidSchedule(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DecodeError {}

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Decode(DecodeError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` does not exist")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<DecodeError> for RepoError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection was opened through `db::open_*` and carries the
/// tables a repository is about to touch.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;

    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in required_tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
