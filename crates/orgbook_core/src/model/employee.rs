//! Employee domain model.
//!
//! # Invariants
//! - `manager_id` is `None` for root employees; form sentinels (`0` or below)
//!   are normalized to `None`.
//! - The manager relation may contain cycles in storage; detection happens at
//!   read time in the hierarchy service.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Persisted employee row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub position: String,
    /// Direct manager. `None` means root of a hierarchy.
    pub manager_id: Option<EmployeeId>,
}

/// Field set for creating or replacing an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    pub department: String,
    pub position: String,
    pub manager_id: Option<EmployeeId>,
}

impl EmployeeDraft {
    /// Creates a root-level draft (no manager).
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            position: position.into(),
            manager_id: None,
        }
    }

    /// Sets the manager, applying the form sentinel rule.
    pub fn with_manager(mut self, manager_id: Option<EmployeeId>) -> Self {
        self.manager_id = normalize_manager_id(manager_id);
        self
    }

    /// Returns a trimmed copy, or the first blank required field.
    pub fn validated(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: require_text("name", &self.name)?,
            department: require_text("department", &self.department)?,
            position: require_text("position", &self.position)?,
            manager_id: normalize_manager_id(self.manager_id),
        })
    }
}

/// Maps the "no manager" form sentinel (`0` or negative) to `None`.
pub fn normalize_manager_id(raw: Option<EmployeeId>) -> Option<EmployeeId> {
    raw.filter(|id| *id > 0)
}
