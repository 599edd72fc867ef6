//! Assignment (task <-> user join) repository.
//!
//! # Invariants
//! - Both endpoints must exist at insert time (foreign keys).
//! - No uniqueness on `(task_id, user_id)`; duplicates are stored as given.

use crate::db::StoreKind;
use crate::model::assignment::{Assignment, AssignmentId};
use crate::model::task::TaskId;
use crate::model::user::UserId;
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row};

pub trait AssignmentRepository {
    fn create_assignment(&self, task_id: TaskId, user_id: UserId) -> RepoResult<AssignmentId>;
    fn delete_assignment(&self, id: AssignmentId) -> RepoResult<usize>;
    fn list_assignments_for_task(&self, task_id: TaskId) -> RepoResult<Vec<Assignment>>;
    fn list_assignments_for_user(&self, user_id: UserId) -> RepoResult<Vec<Assignment>>;
}

pub struct SqliteAssignmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssignmentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, StoreKind::Tasks, "assignments")?;
        Ok(Self { conn })
    }

    fn query_assignments(&self, sql: &str, key: i64) -> RepoResult<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([key])?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next()? {
            assignments.push(parse_assignment_row(row)?);
        }
        Ok(assignments)
    }
}

impl AssignmentRepository for SqliteAssignmentRepository<'_> {
    fn create_assignment(&self, task_id: TaskId, user_id: UserId) -> RepoResult<AssignmentId> {
        self.conn.execute(
            "INSERT INTO assignments (task_id, user_id) VALUES (?1, ?2);",
            params![task_id, user_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete_assignment(&self, id: AssignmentId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM assignments WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn list_assignments_for_task(&self, task_id: TaskId) -> RepoResult<Vec<Assignment>> {
        self.query_assignments(
            "SELECT id, task_id, user_id
             FROM assignments
             WHERE task_id = ?1
             ORDER BY id ASC;",
            task_id,
        )
    }

    fn list_assignments_for_user(&self, user_id: UserId) -> RepoResult<Vec<Assignment>> {
        self.query_assignments(
            "SELECT id, task_id, user_id
             FROM assignments
             WHERE user_id = ?1
             ORDER BY id ASC;",
            user_id,
        )
    }
}

fn parse_assignment_row(row: &Row<'_>) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        id: row.get("id")?,
        task_id: row.get("task_id")?,
        user_id: row.get("user_id")?,
    })
}
