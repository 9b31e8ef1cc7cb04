//! Domain core for the student plan service.
//!
//! Pure types and rules with no I/O: the student aggregate and its courses,
//! the BASIC/PREMIUM plan evaluator, the progress report, and the value
//! objects for document numbers and email addresses.

pub mod course;
pub mod document;
pub mod email;
pub mod error;
pub mod plan;
pub mod progress;
pub mod student;
pub mod types;
pub mod validation;
