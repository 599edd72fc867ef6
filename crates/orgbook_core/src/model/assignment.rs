//! Task-to-user assignment join record.
//!
//! Duplicate `(task_id, user_id)` pairs are permitted.

use crate::model::task::TaskId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type AssignmentId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub task_id: TaskId,
    pub user_id: UserId,
}
