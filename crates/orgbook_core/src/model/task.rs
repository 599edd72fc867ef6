//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its enumerated `priority` / `status` domains.
//! - Convert raw form input into a validated [`TaskDraft`].
//!
//! # Invariants
//! - `priority` is always one of `1..=3`.
//! - `status` is always one of `Not Started | In Progress | Completed`.
//! - `due_date` round-trips through storage as ISO `YYYY-MM-DD`.

use crate::model::project::ProjectId;
use crate::model::validation::{require_text, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type TaskId = i64;

/// Task urgency ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Persisted ordinal (`1..=3`).
    pub fn ordinal(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    /// Accepts `1|2|3` or `low|medium|high` (case-insensitive).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(ordinal) = trimmed.parse::<i64>() {
            return Self::from_ordinal(ordinal)
                .ok_or_else(|| ValidationError::InvalidPriority(trimmed.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::InvalidPriority(trimmed.to_string())),
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Persisted display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Exact inverse of [`TaskStatus::as_str`]; used on read paths.
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "Not Started" => Some(Self::NotStarted),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    /// Accepts the display labels or their snake_case spelling, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "not started" => Ok(Self::NotStarted),
            "in progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError::InvalidStatus(value.trim().to_string())),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub project_id: ProjectId,
}

/// Typed field set for creating or replacing a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub project_id: ProjectId,
}

impl TaskDraft {
    /// Creates a `Not Started`, medium priority draft without date.
    pub fn new(title: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            priority: TaskPriority::Medium,
            status: TaskStatus::NotStarted,
            project_id,
        }
    }

    /// Rejects a blank title. Other fields are already domain-typed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        Ok(())
    }

    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            project_id: self.project_id,
        }
    }
}

/// Raw form submission for task create/update.
///
/// Every field arrives as the scalar the front end collected; conversion into
/// [`TaskDraft`] is the validation boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    pub project_id: ProjectId,
}

impl TryFrom<TaskForm> for TaskDraft {
    type Error = ValidationError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        let title = require_text("title", &form.title)?;
        let due_date = match form.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_due_date(raw)?),
        };
        Ok(Self {
            title,
            description: form.description,
            due_date,
            priority: form.priority.parse()?,
            status: form.status.parse()?,
            project_id: form.project_id,
        })
    }
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.trim().to_string()))
}
