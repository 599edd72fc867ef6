//! Domain model for the employee and task stores.
//!
//! # Responsibility
//! - Define the typed records exchanged between repositories, services and
//!   front ends.
//! - Own boundary validation for enumerated and free-text fields.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned integer id.
//! - Enumerated task fields (`priority`, `status`) can only hold domain values.
//! - Password hashes never appear on [`user::User`].

pub mod assignment;
pub mod employee;
pub mod project;
pub mod task;
pub mod user;
pub mod validation;
