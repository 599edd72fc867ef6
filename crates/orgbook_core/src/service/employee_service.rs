//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable employee CRUD entry points for front ends.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Affected-row counts are passed through untouched; zero means not found.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for employee records.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds an employee and returns its store-assigned id.
    pub fn add_employee(&self, draft: &EmployeeDraft) -> RepoResult<EmployeeId> {
        let id = self.repo.create_employee(draft)?;
        info!("event=employee_add module=service status=ok employee_id={id}");
        Ok(id)
    }

    /// Replaces all fields of one employee.
    pub fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> RepoResult<usize> {
        let changed = self.repo.update_employee(id, draft)?;
        info!("event=employee_update module=service status=ok employee_id={id} affected={changed}");
        Ok(changed)
    }

    /// Deletes one employee; its direct reports become roots.
    pub fn delete_employee(&self, id: EmployeeId) -> RepoResult<usize> {
        let changed = self.repo.delete_employee(id)?;
        info!("event=employee_delete module=service status=ok employee_id={id} affected={changed}");
        Ok(changed)
    }

    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.get_employee(id)
    }

    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_employees()
    }
}
