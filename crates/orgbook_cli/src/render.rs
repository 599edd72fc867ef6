//! Row rendering as tab-separated text or JSON.

use crate::{CliError, Outcome};
use orgbook_core::{Assignment, Employee, Project, Task, User};
use serde::Serialize;

const NONE_CELL: &str = "-";

/// One-line text form of a row.
pub(crate) trait Render {
    fn line(&self) -> String;
}

impl Render for Employee {
    fn line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.id,
            self.name,
            self.department,
            self.position,
            optional(self.manager_id)
        )
    }
}

impl Render for User {
    fn line(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.id,
            self.username,
            optional(self.email.as_deref())
        )
    }
}

impl Render for Project {
    fn line(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.id,
            self.name,
            optional(self.description.as_deref())
        )
    }
}

impl Render for Task {
    fn line(&self) -> String {
        format!(
            "{}\t{}\tproject={}\tpriority={}\tstatus={}\tdue={}",
            self.id,
            self.title,
            self.project_id,
            self.priority,
            self.status,
            optional(self.due_date)
        )
    }
}

impl Render for Assignment {
    fn line(&self) -> String {
        format!("{}\ttask={}\tuser={}", self.id, self.task_id, self.user_id)
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| NONE_CELL.to_string(), |value| value.to_string())
}

pub(crate) fn render_one<T: Render + Serialize>(
    row: Option<T>,
    json: bool,
    missing: String,
) -> Result<Outcome, CliError> {
    let Some(row) = row else {
        return Ok(Outcome::Missing(missing));
    };
    if json {
        return Ok(Outcome::Done(serde_json::to_string_pretty(&row)?));
    }
    Ok(Outcome::Done(row.line()))
}

pub(crate) fn render_many<T: Render + Serialize>(
    rows: &[T],
    json: bool,
) -> Result<Outcome, CliError> {
    if json {
        return Ok(Outcome::Done(serde_json::to_string_pretty(rows)?));
    }
    Ok(Outcome::Done(
        rows.iter().map(Render::line).collect::<Vec<_>>().join("\n"),
    ))
}

/// Zero affected rows means the id did not exist.
pub(crate) fn affected(changed: usize, done: String, missing: String) -> Outcome {
    if changed == 0 {
        Outcome::Missing(missing)
    } else {
        Outcome::Done(done)
    }
}
