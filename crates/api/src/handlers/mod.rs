//! Request handlers.
//!
//! Handlers validate input, delegate domain rules to `enroll_core`,
//! persist through `enroll_db` repositories, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod course;
pub mod student;

use enroll_core::error::CoreError;
use enroll_core::plan::PlanChange;
use enroll_core::types::DbId;

use crate::error::AppError;

pub(crate) fn student_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id,
    })
}

/// Log a BASIC/PREMIUM transition, if the evaluation produced one.
pub(crate) fn log_plan_change(student_id: DbId, change: PlanChange) {
    if change.is_transition() {
        tracing::info!(
            student_id,
            from = %change.previous,
            to = %change.current,
            "Student plan changed",
        );
    }
}
