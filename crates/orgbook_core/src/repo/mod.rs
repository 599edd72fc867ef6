//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity CRUD contracts for both stores.
//! - Isolate SQLite query details from service/business orchestration.
//! - Translate SQLite constraint failures into semantic errors.
//!
//! # Invariants
//! - Every statement binds user input as parameters; no value is ever
//!   interpolated into SQL text.
//! - `update_*` / `delete_*` report affected-row counts; a missing id is
//!   `Ok(0)`, never an error.
//! - Write paths validate drafts before SQL mutations.

use crate::db::migrations::latest_version;
use crate::db::{DbError, StoreKind};
use crate::model::validation::ValidationError;
use rusqlite::{ffi, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment_repo;
pub mod employee_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which storage constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
    Other,
}

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Storage rejected the write (duplicate key, dangling reference, ...).
    Constraint {
        kind: ConstraintKind,
        message: String,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        store: StoreKind,
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl RepoError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Constraint {
                kind: ConstraintKind::Unique,
                ..
            }
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Constraint { kind, message } => {
                write!(f, "constraint violation ({kind:?}): {message}")
            }
            Self::UninitializedConnection {
                store,
                expected_version,
                actual_version,
            } => write!(
                f,
                "{store} repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Constraint { .. } => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let message = message.unwrap_or_else(|| failure.to_string());
                Self::Constraint {
                    kind: constraint_kind(failure.extended_code, &message),
                    message,
                }
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

const FOREIGN_KEY_FAILED_MESSAGE: &str = "FOREIGN KEY constraint failed";

/// `ON DELETE RESTRICT` reports the bare `SQLITE_CONSTRAINT` code, so the
/// message is the only foreign-key signal there.
fn constraint_kind(extended_code: i32, message: &str) -> ConstraintKind {
    match extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            ConstraintKind::Unique
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => ConstraintKind::ForeignKey,
        ffi::SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
        ffi::SQLITE_CONSTRAINT_NOTNULL => ConstraintKind::NotNull,
        ffi::SQLITE_CONSTRAINT if message.starts_with(FOREIGN_KEY_FAILED_MESSAGE) => {
            ConstraintKind::ForeignKey
        }
        _ => ConstraintKind::Other,
    }
}

/// Verifies that `conn` is migrated for `store` and carries `table`.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    store: StoreKind,
    table: &'static str,
) -> RepoResult<()> {
    let expected_version = latest_version(store);
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            store,
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
