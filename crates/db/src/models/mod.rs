//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - `Deserialize` + `Validate` DTOs for inserts and updates
//! - Query filter types for list endpoints

pub mod course;
pub mod student;
