//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations per store in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic within one store.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Migration SQL only uses `IF NOT EXISTS` DDL, so re-running is harmless.

use crate::db::{DbError, DbResult, StoreKind};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const EMPLOYEE_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("employees/0001_init.sql"),
}];

const TASK_MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("tasks/0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("tasks/0002_lookup_indexes.sql"),
    },
];

fn migrations_for(kind: StoreKind) -> &'static [Migration] {
    match kind {
        StoreKind::Employees => EMPLOYEE_MIGRATIONS,
        StoreKind::Tasks => TASK_MIGRATIONS,
    }
}

/// Returns the latest migration version known by this binary for `kind`.
pub fn latest_version(kind: StoreKind) -> u32 {
    migrations_for(kind)
        .last()
        .map_or(0, |migration| migration.version)
}

/// Applies all pending migrations for `kind` on the provided connection.
pub fn apply_migrations(conn: &mut Connection, kind: StoreKind) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version(kind);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            store: kind,
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations_for(kind) {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok store={kind} from_version={current_version} to_version={latest}"
    );
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
