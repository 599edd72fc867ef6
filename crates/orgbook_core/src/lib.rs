//! Core domain logic for orgbook.
//! This crate is the single source of truth for record invariants, hierarchy
//! resolution and credential handling.

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use app::{AppError, AppResult, OrgBook};
pub use config::StoreConfig;
pub use db::{Database, DbError, StoreKind};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingOptions};
pub use model::assignment::{Assignment, AssignmentId};
pub use model::employee::{Employee, EmployeeDraft, EmployeeId};
pub use model::project::{Project, ProjectDraft, ProjectId};
pub use model::task::{Task, TaskDraft, TaskForm, TaskId, TaskPriority, TaskStatus};
pub use model::user::{User, UserId};
pub use model::validation::ValidationError;
pub use repo::assignment_repo::{AssignmentRepository, SqliteAssignmentRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{ConstraintKind, RepoError, RepoResult};
pub use search::employee_search::{
    search_employees, EmployeeSearchQuery, SearchError, SearchField, SearchResult,
};
pub use service::credential_service::{
    Argon2PasswordHasher, CredentialError, CredentialService, PasswordHasher,
};
pub use service::employee_service::EmployeeService;
pub use service::hierarchy_service::{
    render_hierarchy, HierarchyEntry, HierarchyEntryKind, HierarchyError, HierarchyService,
    CIRCULAR_REFERENCE_LABEL,
};
pub use service::project_service::ProjectService;
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
