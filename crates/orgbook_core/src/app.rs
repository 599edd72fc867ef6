//! Front-end facing operation facade.
//!
//! # Responsibility
//! - Map each front-end menu action onto exactly one core use-case call.
//! - Acquire a fresh connection per operation and release it on return.
//!
//! # Invariants
//! - `OrgBook` holds store locations only, never a live connection.
//! - Search field parsing runs before a connection is opened; task forms are
//!   parsed by `TaskService` before any SQL runs.
//! - Each operation commits independently; nothing spans both stores.

use crate::config::StoreConfig;
use crate::db::{Database, DbError, StoreKind};
use crate::model::assignment::{Assignment, AssignmentId};
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::model::task::{Task, TaskForm, TaskId};
use crate::model::user::{User, UserId};
use crate::model::validation::ValidationError;
use crate::repo::assignment_repo::SqliteAssignmentRepository;
use crate::repo::employee_repo::SqliteEmployeeRepository;
use crate::repo::project_repo::SqliteProjectRepository;
use crate::repo::task_repo::SqliteTaskRepository;
use crate::repo::user_repo::SqliteUserRepository;
use crate::repo::RepoError;
use crate::search::employee_search::{search_employees, EmployeeSearchQuery, SearchError};
use crate::service::credential_service::{CredentialError, CredentialService};
use crate::service::employee_service::EmployeeService;
use crate::service::hierarchy_service::{HierarchyEntry, HierarchyError, HierarchyService};
use crate::service::project_service::ProjectService;
use crate::service::task_service::TaskService;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Union of everything a facade call can fail with.
#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Db(DbError),
    Repo(RepoError),
    Search(SearchError),
    Credential(CredentialError),
    Hierarchy(HierarchyError),
}

impl AppError {
    /// True for rejections raised at the input boundary.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Repo(RepoError::Validation(_))
                | Self::Search(SearchError::InvalidField(_))
                | Self::Credential(CredentialError::Validation(_))
        )
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Search(err) => write!(f, "{err}"),
            Self::Credential(err) => write!(f, "{err}"),
            Self::Hierarchy(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Search(err) => Some(err),
            Self::Credential(err) => Some(err),
            Self::Hierarchy(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DbError> for AppError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Repo(RepoError::Validation(value))
    }
}

impl From<SearchError> for AppError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

impl From<CredentialError> for AppError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}

impl From<HierarchyError> for AppError {
    fn from(value: HierarchyError) -> Self {
        Self::Hierarchy(value)
    }
}

/// Per-operation entry point over the employee and task stores.
#[derive(Debug, Clone)]
pub struct OrgBook {
    employees: Database,
    tasks: Database,
}

impl OrgBook {
    /// Creates the data directory and provisions both store schemas.
    ///
    /// Safe to call on every process start.
    pub fn open(config: &StoreConfig) -> AppResult<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let book = Self {
            employees: Database::new(StoreKind::Employees, config.employee_db_path()),
            tasks: Database::new(StoreKind::Tasks, config.task_db_path()),
        };
        // Opening runs migrations; the connections close right away.
        drop(book.employees.connect()?);
        drop(book.tasks.connect()?);
        info!(
            "event=orgbook_open module=app status=ok data_dir={}",
            config.data_dir.display()
        );
        Ok(book)
    }

    pub fn employee_store(&self) -> &Database {
        &self.employees
    }

    pub fn task_store(&self) -> &Database {
        &self.tasks
    }

    fn with_employees<T>(
        &self,
        op: impl FnOnce(&Connection) -> AppResult<T>,
    ) -> AppResult<T> {
        let conn = self.employees.connect()?;
        op(&conn)
    }

    fn with_tasks<T>(&self, op: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let conn = self.tasks.connect()?;
        op(&conn)
    }

    fn with_employee_service<T>(
        &self,
        op: impl FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> Result<T, RepoError>,
    ) -> AppResult<T> {
        self.with_employees(|conn| {
            let service = EmployeeService::new(SqliteEmployeeRepository::try_new(conn)?);
            Ok(op(&service)?)
        })
    }

    fn with_project_service<T>(
        &self,
        op: impl FnOnce(&ProjectService<SqliteProjectRepository<'_>>) -> Result<T, RepoError>,
    ) -> AppResult<T> {
        self.with_tasks(|conn| {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            Ok(op(&service)?)
        })
    }

    fn with_task_service<T>(
        &self,
        op: impl FnOnce(
            &TaskService<SqliteTaskRepository<'_>, SqliteAssignmentRepository<'_>>,
        ) -> Result<T, RepoError>,
    ) -> AppResult<T> {
        self.with_tasks(|conn| {
            let service = TaskService::new(
                SqliteTaskRepository::try_new(conn)?,
                SqliteAssignmentRepository::try_new(conn)?,
            );
            Ok(op(&service)?)
        })
    }

    // Employees -----------------------------------------------------------

    pub fn add_employee(&self, draft: &EmployeeDraft) -> AppResult<EmployeeId> {
        self.with_employee_service(|service| service.add_employee(draft))
    }

    pub fn update_employee(&self, id: EmployeeId, draft: &EmployeeDraft) -> AppResult<usize> {
        self.with_employee_service(|service| service.update_employee(id, draft))
    }

    pub fn delete_employee(&self, id: EmployeeId) -> AppResult<usize> {
        self.with_employee_service(|service| service.delete_employee(id))
    }

    pub fn get_employee(&self, id: EmployeeId) -> AppResult<Option<Employee>> {
        self.with_employee_service(|service| service.get_employee(id))
    }

    pub fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.with_employee_service(|service| service.list_employees())
    }

    /// Parses `field` against the searchable columns, then searches.
    pub fn search_employees(&self, field: &str, value: &str) -> AppResult<Vec<Employee>> {
        let query = EmployeeSearchQuery::parse(field, value)?;
        self.with_employees(|conn| Ok(search_employees(conn, &query)?))
    }

    pub fn view_hierarchy(&self, root_id: EmployeeId) -> AppResult<Vec<HierarchyEntry>> {
        self.with_employees(|conn| {
            let service = HierarchyService::new(SqliteEmployeeRepository::try_new(conn)?);
            Ok(service.resolve_hierarchy(root_id)?)
        })
    }

    // Accounts ------------------------------------------------------------

    /// Returns `false` when the username is taken.
    pub fn register(&self, username: &str, password: &str, email: Option<&str>) -> AppResult<bool> {
        self.with_tasks(|conn| {
            let service = CredentialService::new(SqliteUserRepository::try_new(conn)?);
            Ok(service.register(username, password, email)?)
        })
    }

    /// Returns `None` for an unknown username or a wrong password.
    pub fn login(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        self.with_tasks(|conn| {
            let service = CredentialService::new(SqliteUserRepository::try_new(conn)?);
            Ok(service.login(username, password)?)
        })
    }

    // Projects ------------------------------------------------------------

    pub fn create_project(&self, draft: &ProjectDraft) -> AppResult<ProjectId> {
        self.with_project_service(|service| service.create_project(draft))
    }

    pub fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> AppResult<usize> {
        self.with_project_service(|service| service.update_project(id, draft))
    }

    pub fn delete_project(&self, id: ProjectId) -> AppResult<usize> {
        self.with_project_service(|service| service.delete_project(id))
    }

    pub fn get_project(&self, id: ProjectId) -> AppResult<Option<Project>> {
        self.with_project_service(|service| service.get_project(id))
    }

    pub fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.with_project_service(|service| service.list_projects())
    }

    // Tasks & assignments -------------------------------------------------

    pub fn create_task(&self, form: TaskForm) -> AppResult<TaskId> {
        self.with_task_service(|service| service.create_task_from_form(form))
    }

    pub fn update_task(&self, id: TaskId, form: TaskForm) -> AppResult<usize> {
        self.with_task_service(|service| service.update_task_from_form(id, form))
    }

    pub fn delete_task(&self, id: TaskId) -> AppResult<usize> {
        self.with_task_service(|service| service.delete_task(id))
    }

    pub fn get_task(&self, id: TaskId) -> AppResult<Option<Task>> {
        self.with_task_service(|service| service.get_task(id))
    }

    pub fn list_tasks(&self, project_id: Option<ProjectId>) -> AppResult<Vec<Task>> {
        self.with_task_service(|service| match project_id {
            Some(project_id) => service.list_tasks_for_project(project_id),
            None => service.list_tasks(),
        })
    }

    pub fn assign_task(&self, task_id: TaskId, user_id: UserId) -> AppResult<AssignmentId> {
        self.with_task_service(|service| service.assign_task(task_id, user_id))
    }

    pub fn unassign(&self, id: AssignmentId) -> AppResult<usize> {
        self.with_task_service(|service| service.unassign(id))
    }

    pub fn list_assignments_for_task(&self, task_id: TaskId) -> AppResult<Vec<Assignment>> {
        self.with_task_service(|service| service.list_assignments_for_task(task_id))
    }

    pub fn list_assignments_for_user(&self, user_id: UserId) -> AppResult<Vec<Assignment>> {
        self.with_task_service(|service| service.list_assignments_for_user(user_id))
    }
}
