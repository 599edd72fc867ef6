//! Project repository contracts and SQLite implementation.
//!
//! Deleting a project that still owns tasks is rejected by the
//! `tasks.project_id` foreign key (default `NO ACTION`, checked per statement).

use crate::db::StoreKind;
use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub trait ProjectRepository {
    fn create_project(&self, draft: &ProjectDraft) -> RepoResult<ProjectId>;
    fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<usize>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<usize>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
}

pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, StoreKind::Tasks, "projects")?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, draft: &ProjectDraft) -> RepoResult<ProjectId> {
        let draft = draft.validated()?;
        self.conn.execute(
            "INSERT INTO projects (name, description) VALUES (?1, ?2);",
            params![draft.name, draft.description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<usize> {
        let draft = draft.validated()?;
        let changed = self.conn.execute(
            "UPDATE projects SET name = ?1, description = ?2 WHERE id = ?3;",
            params![draft.name, draft.description, id],
        )?;
        Ok(changed)
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT id, name, description FROM projects WHERE id = ?1;",
                [id],
                parse_project_row,
            )
            .optional()?;
        Ok(project)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM projects ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}
