//! Search entry points.
//!
//! # Responsibility
//! - Expose field-restricted substring search over employee records.
//! - Keep column selection behind a closed allow-list.

pub mod employee_search;
