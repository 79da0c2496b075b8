//! SQLite-backed repositories.
//!
//! Every record type gets its own table of `(id, blob, updated_at)` rows,
//! the blob being the record serialized as JSON. All tables share one
//! connection.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use sheet_core::{CharacterRecord, LiveSheet, PlayerRecord};

use super::error::{RepositoryError, Result};
use super::traits::{Record, Repository};

const TABLES: [&str; 3] = [
    <PlayerRecord as Record>::TABLE,
    <CharacterRecord as Record>::TABLE,
    <LiveSheet as Record>::TABLE,
];

/// Shared handle to the character database.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`, creating parent
    /// directories and tables as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened character database at {}", path.display());
        Self::with_connection(conn)
    }

    /// A private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        for table in TABLES {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY,
                    blob TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );"
            ))?;
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn players(&self) -> SqliteTable<PlayerRecord> {
        SqliteTable::new(self.clone())
    }

    pub fn characters(&self) -> SqliteTable<CharacterRecord> {
        SqliteTable::new(self.clone())
    }

    pub fn live_characters(&self) -> SqliteTable<LiveSheet> {
        SqliteTable::new(self.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepositoryError::LockPoisoned)
    }

    /// Writes a raw blob, bypassing serialization.
    #[cfg(test)]
    fn write_raw(&self, table: &str, id: i64, blob: &str) -> Result<()> {
        self.lock()?.execute(
            &format!("INSERT OR REPLACE INTO {table} (id, blob, updated_at) VALUES (?1, ?2, ?3)"),
            params![id, blob, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

/// One table of a [`SqliteStore`], typed by the record it holds.
#[derive(Clone, Debug)]
pub struct SqliteTable<T> {
    store: SqliteStore,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteTable<T> {
    fn new(store: SqliteStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> for SqliteTable<T> {
    fn save(&self, record: &T) -> Result<()> {
        let blob = serde_json::to_string(record)?;
        self.store.lock()?.execute(
            &format!(
                "INSERT INTO {} (id, blob, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET blob = excluded.blob, updated_at = excluded.updated_at",
                T::TABLE
            ),
            params![record.id(), blob, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!("Saved {}[{}]", T::TABLE, record.id());
        Ok(())
    }

    fn load(&self, id: i64) -> Result<Option<T>> {
        let blob: Option<String> = self
            .store
            .lock()?
            .query_row(
                &format!("SELECT blob FROM {} WHERE id = ?1", T::TABLE),
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        blob.map(|blob| {
            serde_json::from_str(&blob).map_err(|e| RepositoryError::CorruptedData {
                table: T::TABLE,
                id,
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = self
            .store
            .lock()?
            .query_row(
                &format!("SELECT id FROM {} WHERE id = ?1", T::TABLE),
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn delete(&self, id: i64) -> Result<()> {
        let removed = self
            .store
            .lock()?
            .execute(&format!("DELETE FROM {} WHERE id = ?1", T::TABLE), params![id])?;
        if removed > 0 {
            tracing::debug!("Deleted {}[{}]", T::TABLE, id);
        }
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<i64>> {
        let conn = self.store.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT id FROM {} ORDER BY id ASC", T::TABLE))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn next_id(&self) -> Result<i64> {
        let next = self.store.lock()?.query_row(
            &format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(next)
    }
}
