//! Snapshot repository contracts and implementations.
//!
//! # Responsibility
//! - Persist and retrieve the serialized store snapshot.
//! - Keep SQL and file-system details out of the store.
//!
//! # Invariants
//! - `load()` returns `Ok(None)` when nothing was ever saved.
//! - `save()` replaces the previous payload wholesale (last write wins).

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Fixed key the snapshot is stored under.
pub const STORAGE_KEY: &str = "xp_tracker_state_v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage adapter error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io(std::io::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        if value.kind() == ErrorKind::InvalidData {
            return Self::InvalidData(value.to_string());
        }
        Self::Io(value)
    }
}

/// Durable storage port used by the store.
pub trait SnapshotRepository {
    /// Returns the last saved payload, if any.
    fn load(&self) -> RepoResult<Option<String>>;
    /// Replaces the stored payload.
    fn save(&self, payload: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository over the `kv_store` table.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Uses the default `STORAGE_KEY`.
    ///
    /// The connection must come from `open_db`/`open_db_in_memory` so the
    /// `kv_store` table exists.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save(&self, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }
}

/// JSON file snapshot repository.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct JsonFileSnapshotRepository {
    path: PathBuf,
}

impl JsonFileSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load(&self) -> RepoResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, payload: &str) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let temp_path = self.temp_path();
        std::fs::write(&temp_path, payload)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// In-memory snapshot repository for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    payload: RefCell<Option<String>>,
    save_count: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing payload, as if saved by an earlier session.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
            ..Self::default()
        }
    }

    /// Returns the currently stored payload.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    /// Makes subsequent saves fail with a quota-style I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load(&self) -> RepoResult<Option<String>> {
        Ok(self.payload())
    }

    fn save(&self, payload: &str) -> RepoResult<()> {
        if self.fail_saves.get() {
            return Err(RepoError::Io(std::io::Error::new(
                ErrorKind::Other,
                "storage quota exceeded",
            )));
        }
        *self.payload.borrow_mut() = Some(payload.to_string());
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}
