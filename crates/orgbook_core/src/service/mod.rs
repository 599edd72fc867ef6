//! Service layer: use-case orchestration above repositories.
//!
//! # Responsibility
//! - Expose front-end facing operations per concern.
//! - Hold business rules that span more than one query (hierarchy walk,
//!   credential hashing, form conversion).

pub mod credential_service;
pub mod employee_service;
pub mod hierarchy_service;
pub mod project_service;
pub mod task_service;
