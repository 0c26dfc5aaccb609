//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Map unique category names to row ids for tracker association.
//!
//! # Invariants
//! - `name` is the lookup key; duplicate creates resolve to the existing row.
//! - The pinned pseudo-category is a normal row here; filtering it from
//!   user-facing listings is store-level policy.

use crate::model::tracker::Category;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{Connection, OptionalExtension};

/// Repository interface for category persistence.
pub trait CategoryRepository {
    /// Creates the category if absent and returns its row id either way.
    fn ensure(&self, name: &str) -> RepoResult<i64>;
    /// Resolves a name to its row id, if the category exists.
    fn find_id(&self, name: &str) -> RepoResult<Option<i64>>;
    /// Lists all categories sorted by name, pinned pseudo-category included.
    fn list(&self) -> RepoResult<Vec<Category>>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["categories"])?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn ensure(&self, name: &str) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO categories (name) VALUES (?1);",
            [name],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM categories WHERE name = ?1;",
            [name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn find_id(&self, name: &str) -> RepoResult<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM categories WHERE name = ?1;",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn list(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories ORDER BY name ASC;")?;

        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(Category::new(row.get::<_, String>(0)?));
        }

        Ok(categories)
    }
}
