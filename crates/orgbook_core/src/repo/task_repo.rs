//! Task repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over `tasks` in the task store.
//! - Keep priority/status encoding inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `TaskDraft::validate()` before SQL mutations.
//! - Read paths reject out-of-domain priority/status instead of masking it.
//! - Updating a missing id affects zero rows and never inserts.

use crate::db::StoreKind;
use crate::model::project::ProjectId;
use crate::model::task::{Task, TaskDraft, TaskId, TaskPriority, TaskStatus};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    due_date,
    priority,
    status,
    project_id
FROM tasks";

pub trait TaskRepository {
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<TaskId>;
    fn update_task(&self, id: TaskId, draft: &TaskDraft) -> RepoResult<usize>;
    /// Deletes one task; its assignments are removed by cascade.
    fn delete_task(&self, id: TaskId) -> RepoResult<usize>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn list_tasks_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
}

pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, StoreKind::Tasks, "tasks")?;
        Ok(Self { conn })
    }

    fn query_tasks(&self, sql: &str, project_id: Option<ProjectId>) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = match project_id {
            Some(project_id) => stmt.query([project_id])?,
            None => stmt.query([])?,
        };
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<TaskId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                title,
                description,
                due_date,
                priority,
                status,
                project_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                draft.title,
                draft.description,
                draft.due_date,
                draft.priority.ordinal(),
                draft.status.as_str(),
                draft.project_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task(&self, id: TaskId, draft: &TaskDraft) -> RepoResult<usize> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                due_date = ?3,
                priority = ?4,
                status = ?5,
                project_id = ?6
             WHERE id = ?7;",
            params![
                draft.title,
                draft.description,
                draft.due_date,
                draft.priority.ordinal(),
                draft.status.as_str(),
                draft.project_id,
                id,
            ],
        )?;

        Ok(changed)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_tasks(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"), None)
    }

    fn list_tasks_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE project_id = ?1 ORDER BY id ASC;"),
            Some(project_id),
        )
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let priority_value: i64 = row.get("priority")?;
    let priority = TaskPriority::from_ordinal(priority_value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_value}` in tasks.priority"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let due_date: Option<NaiveDate> = row.get("due_date").map_err(|err| {
        RepoError::InvalidData(format!("invalid due_date in tasks.due_date: {err}"))
    })?;

    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date,
        priority,
        status,
        project_id: row.get("project_id")?,
    })
}
