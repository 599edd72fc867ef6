//! Boundary validation errors shared by all model types.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised before any input reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Priority outside `1..=3` or not a recognized name.
    InvalidPriority(String),
    /// Status outside `Not Started | In Progress | Completed`.
    InvalidStatus(String),
    /// Date not in `YYYY-MM-DD` form.
    InvalidDate(String),
    /// Email present but not shaped like `local@domain`.
    InvalidEmail,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected 1|2|3 or low|medium|high")
            }
            Self::InvalidStatus(value) => write!(
                f,
                "invalid status `{value}`; expected Not Started|In Progress|Completed"
            ),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(trimmed.to_string())
}
