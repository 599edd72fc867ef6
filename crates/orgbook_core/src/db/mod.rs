//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for both orgbook stores.
//! - Apply schema migrations in deterministic order.
//! - Hand out per-operation connections through [`Database`].
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`, per store.
//! - Core code must not read/write application data before migrations succeed.
//! - No connection outlives the operation that opened it.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Logical store selector. Each store is a separate SQLite file with its own
/// migration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Holds `employees`.
    Employees,
    /// Holds `users`, `projects`, `tasks` and `assignments`.
    Tasks,
}

impl StoreKind {
    /// Stable short name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Tasks => "tasks",
        }
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        store: StoreKind,
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                store,
                db_version,
                latest_supported,
            } => write!(
                f,
                "{store} store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// File-backed store location.
///
/// Holds no connection. Every call to [`Database::connect`] opens a fresh,
/// fully migrated connection that is closed when the caller drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    kind: StoreKind,
    path: PathBuf,
}

impl Database {
    pub fn new(kind: StoreKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection scoped to one operation.
    pub fn connect(&self) -> DbResult<rusqlite::Connection> {
        open_db(&self.path, self.kind)
    }
}
