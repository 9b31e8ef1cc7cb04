//! Progress report towards the PREMIUM plan.
//!
//! Read-only: building a [`ProgressSummary`] never mutates the student.
//! The percentage is deliberately not clamped, so students beyond the
//! threshold report more than 100%.

use serde::Serialize;

use crate::plan::{Plan, PREMIUM_REQUIRED_APPROVED_COURSES};
use crate::student::Student;

/// Approved count from which the "almost there" message is shown.
pub const ALMOST_THERE_APPROVED: u32 = 10;

/// Approved count from which the "half the way" message is shown.
pub const HALF_WAY_APPROVED: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub student_name: String,
    pub current_plan: Plan,
    pub approved: u32,
    pub required: u32,
    pub remaining: u32,
    pub percentage: f64,
    pub eligible: bool,
    pub message: String,
}

impl ProgressSummary {
    /// Summarize a student's progress from their current courses.
    pub fn for_student(student: &Student) -> Self {
        let approved = student.count_approved_courses();
        Self {
            student_name: student.name().to_string(),
            current_plan: student.plan(),
            ..Self::from_approved(approved)
        }
    }

    /// Build the count-derived fields for `approved` courses.
    ///
    /// `student_name` is left empty and `current_plan` is BASIC.
    pub fn from_approved(approved: u32) -> Self {
        let required = PREMIUM_REQUIRED_APPROVED_COURSES;
        let remaining = required.saturating_sub(approved);
        let eligible = approved >= required;
        Self {
            student_name: String::new(),
            current_plan: Plan::Basic,
            approved,
            required,
            remaining,
            percentage: round2(f64::from(approved) / f64::from(required) * 100.0),
            eligible,
            message: progress_message(approved, remaining, eligible),
        }
    }
}

/// Pick the encouragement message; first matching tier wins.
pub fn progress_message(approved: u32, remaining: u32, eligible: bool) -> String {
    if eligible {
        "Congratulations! You reached the Premium plan!".to_string()
    } else if approved >= ALMOST_THERE_APPROVED {
        format!("You're almost there! Only {remaining} courses left!")
    } else if approved >= HALF_WAY_APPROVED {
        "Keep going! You've completed half the way!".to_string()
    } else {
        format!("Keep studying! {remaining} courses left for Premium.")
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
