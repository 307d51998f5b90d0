//! SQLite gateway for gallery records.
//!
//! Maps [`GalleryDb`] onto the `galleries` table and owns no business rules.
//! Its only translation is `QueryReturnedNoRows` → [`GalleryError::NotFound`];
//! every other driver error is wrapped as [`GalleryError::Backend`].
//!
//! Rows are never physically deleted. `delete` stamps `deleted_at` and every
//! read filters on `deleted_at IS NULL`.

use super::backend::{GalleryDb, GalleryError};
use crate::types::{Gallery, Model};
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use std::path::Path;
use tracing::debug;

/// Schema for the gallery table. Safe to run repeatedly.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS galleries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    deleted_at  TEXT,
    user_id     INTEGER NOT NULL,
    title       TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_galleries_user_id ON galleries(user_id);
CREATE INDEX IF NOT EXISTS idx_galleries_deleted_at ON galleries(deleted_at);
"#;

const COLUMNS: &str = "id, created_at, updated_at, deleted_at, user_id, title";

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open (or create) the database file at `path`.
    ///
    /// Missing parent directories are created. `":memory:"` opens a private
    /// in-memory database.
    pub fn open(path: &Path) -> Result<Self, GalleryError> {
        if path.as_os_str() == ":memory:" {
            return Self::open_in_memory();
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "opening gallery database");
        Ok(Self::new(Connection::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, GalleryError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Create the gallery table and indexes if they don't exist yet.
    pub fn auto_migrate(&self) -> Result<(), GalleryError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Drop the gallery table, then recreate it empty.
    pub fn destructive_reset(&self) -> Result<(), GalleryError> {
        self.conn.execute_batch("DROP TABLE IF EXISTS galleries;")?;
        self.auto_migrate()
    }

    /// Number of rows in the table, soft-deleted ones included.
    pub fn count_all(&self) -> Result<u64, GalleryError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM galleries", [], |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }
}

/// Run a single-row query, turning "no rows" into [`GalleryError::NotFound`].
fn first(result: rusqlite::Result<Gallery>) -> Result<Gallery, GalleryError> {
    match result {
        Ok(gallery) => Ok(gallery),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GalleryError::NotFound),
        Err(e) => Err(e.into()),
    }
}

/// SQLite integers are signed; IDs above `i64::MAX` cannot be stored.
fn sql_id(id: u64) -> rusqlite::Result<i64> {
    i64::try_from(id).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn read_id(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    let raw: i64 = row.get(idx)?;
    u64::try_from(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Integer, Box::new(e))
    })
}

fn gallery_from_row(row: &Row) -> rusqlite::Result<Gallery> {
    Ok(Gallery {
        model: Model {
            id: read_id(row, 0)?,
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            deleted_at: row.get(3)?,
        },
        user_id: read_id(row, 4)?,
        title: row.get(5)?,
        images: Vec::new(),
    })
}

impl GalleryDb for SqliteBackend {
    fn by_id(&self, id: u64) -> Result<Gallery, GalleryError> {
        debug!(gallery_id = id, "gallery by id");
        let Ok(id) = sql_id(id) else {
            return Err(GalleryError::NotFound);
        };
        let sql = format!("SELECT {COLUMNS} FROM galleries WHERE id = ?1 AND deleted_at IS NULL");
        first(
            self.conn
                .query_row(&sql, params![id], gallery_from_row),
        )
    }

    fn by_user_id(&self, user_id: u64) -> Result<Vec<Gallery>, GalleryError> {
        debug!(user_id, "galleries by user");
        let Ok(user_id) = sql_id(user_id) else {
            return Ok(Vec::new());
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM galleries WHERE user_id = ?1 AND deleted_at IS NULL ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let galleries = stmt
            .query_map(params![user_id], gallery_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(galleries)
    }

    fn create(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        let user_id = sql_id(gallery.user_id)?;
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO galleries (created_at, updated_at, user_id, title) VALUES (?1, ?2, ?3, ?4)",
            params![now, now, user_id, gallery.title],
        )?;
        gallery.model = Model {
            id: self.conn.last_insert_rowid() as u64,
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
        };
        debug!(gallery_id = gallery.model.id, user_id = gallery.user_id, "gallery created");
        Ok(())
    }

    fn update(&self, gallery: &mut Gallery) -> Result<(), GalleryError> {
        let user_id = sql_id(gallery.user_id)?;
        let Ok(id) = sql_id(gallery.model.id) else {
            return Err(GalleryError::NotFound);
        };
        let now = Utc::now();
        let changed = self.conn.execute(
            "UPDATE galleries SET user_id = ?1, title = ?2, updated_at = ?3 \
             WHERE id = ?4 AND deleted_at IS NULL",
            params![user_id, gallery.title, now, id],
        )?;
        if changed == 0 {
            return Err(GalleryError::NotFound);
        }
        gallery.model.updated_at = Some(now);
        debug!(gallery_id = gallery.model.id, "gallery updated");
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<(), GalleryError> {
        let Ok(sql) = sql_id(id) else {
            return Ok(());
        };
        self.conn.execute(
            "UPDATE galleries SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
            params![Utc::now(), sql],
        )?;
        debug!(gallery_id = id, "gallery soft-deleted");
        Ok(())
    }
}
