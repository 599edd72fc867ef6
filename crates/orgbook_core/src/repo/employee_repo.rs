//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `employees` table of the employee store.
//! - Expose the direct-report lookup used by hierarchy resolution.
//!
//! # Invariants
//! - Write paths call `EmployeeDraft::validated()` before SQL mutations.
//! - Direct reports come back in storage row order (`id` is the rowid).

use crate::db::StoreKind;
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    name,
    department,
    position,
    manager_id
FROM employees";

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId>;
    /// Replaces all fields of one employee. Returns affected rows.
    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize>;
    /// Deletes one employee; direct reports become roots. Returns affected rows.
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Lists employees whose `manager_id` equals `manager_id`.
    fn list_direct_reports(&self, manager_id: EmployeeId) -> RepoResult<Vec<Employee>>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated employee-store connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, StoreKind::Employees, "employees")?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
        let draft = draft.validated()?;

        self.conn.execute(
            "INSERT INTO employees (name, department, position, manager_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name,
                draft.department,
                draft.position,
                draft.manager_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize> {
        let draft = draft.validated()?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET
                name = ?1,
                department = ?2,
                position = ?3,
                manager_id = ?4
             WHERE id = ?5;",
            params![
                draft.name,
                draft.department,
                draft.position,
                draft.manager_id,
                id,
            ],
        )?;

        Ok(changed)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn list_direct_reports(&self, manager_id: EmployeeId) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE manager_id = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([manager_id])?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next()? {
            reports.push(parse_employee_row(row)?);
        }
        Ok(reports)
    }
}

pub(crate) fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        department: row.get("department")?,
        position: row.get("position")?,
        manager_id: row.get("manager_id")?,
    })
}
