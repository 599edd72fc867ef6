//! Field-restricted employee substring search.
//!
//! # Responsibility
//! - Map a user-chosen field onto a fixed column name.
//! - Match a literal, case-insensitive substring against that column.
//!
//! # Invariants
//! - Column names only come from [`SearchField::column`]; user text is never
//!   used as an identifier.
//! - The search value is bound as a parameter with LIKE wildcards escaped.
//! - Results follow storage row order.

use crate::db::DbError;
use crate::model::employee::Employee;
use crate::repo::employee_repo::{parse_employee_row, EMPLOYEE_SELECT_SQL};
use log::debug;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const LIKE_ESCAPE: char = '\\';

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for field parsing and DB interaction.
#[derive(Debug)]
pub enum SearchError {
    /// Field name is not one of the searchable columns.
    InvalidField(String),
    Db(DbError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(field) => write!(
                f,
                "invalid search field `{field}`; expected name|department|position"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Searchable employee columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Department,
    Position,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [Self::Name, Self::Department, Self::Position];

    /// Fixed SQL column for this field.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Department => "department",
            Self::Position => "position",
        }
    }
}

impl FromStr for SearchField {
    type Err = SearchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "department" => Ok(Self::Department),
            "position" => Ok(Self::Position),
            _ => Err(SearchError::InvalidField(value.trim().to_string())),
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// One employee search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSearchQuery {
    pub field: SearchField,
    /// Literal substring; empty matches every row.
    pub value: String,
}

impl EmployeeSearchQuery {
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// Parses a front-end supplied field name before any SQL is built.
    pub fn parse(field: &str, value: impl Into<String>) -> SearchResult<Self> {
        Ok(Self::new(field.parse()?, value))
    }
}

/// Returns employees whose chosen column contains `query.value`,
/// ignoring ASCII case.
pub fn search_employees(
    conn: &Connection,
    query: &EmployeeSearchQuery,
) -> SearchResult<Vec<Employee>> {
    let column = query.field.column();
    let sql = format!(
        "{EMPLOYEE_SELECT_SQL}
         WHERE {column} LIKE ?1 ESCAPE '{LIKE_ESCAPE}'
         ORDER BY id ASC;"
    );
    let pattern = format!("%{}%", escape_like(&query.value));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([pattern])?;
    let mut hits = Vec::new();
    while let Some(row) = rows.next()? {
        hits.push(parse_employee_row(row)?);
    }

    debug!(
        "event=employee_search module=search status=ok field={} value_len={} hits={}",
        column,
        query.value.chars().count(),
        hits.len()
    );
    Ok(hits)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_like, SearchError, SearchField};

    #[test]
    fn field_parsing_is_closed_and_case_insensitive() {
        assert_eq!("Name".parse::<SearchField>().unwrap(), SearchField::Name);
        assert_eq!(
            " department ".parse::<SearchField>().unwrap(),
            SearchField::Department
        );
        for field in SearchField::ALL {
            assert_eq!(field.column().parse::<SearchField>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_field_text_is_rejected() {
        for raw in ["id", "manager_id", "name; DROP TABLE employees", "name--"] {
            let err = raw.parse::<SearchField>().unwrap_err();
            assert!(matches!(err, SearchError::InvalidField(_)), "{raw}");
        }
    }

    #[test]
    fn escape_like_protects_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
