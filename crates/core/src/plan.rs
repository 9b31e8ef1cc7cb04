//! Plan tiers, business thresholds, and the plan evaluator.
//!
//! A student is on the PREMIUM plan exactly when they hold at least
//! [`PREMIUM_REQUIRED_APPROVED_COURSES`] approved courses. The evaluator is a
//! pure function of that count, so it downgrades as readily as it upgrades.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Business constants
// ---------------------------------------------------------------------------

/// Approved courses needed to reach the PREMIUM plan.
pub const PREMIUM_REQUIRED_APPROVED_COURSES: u32 = 12;

/// Minimum final score for a completed course to count as approved.
pub const PASSING_SCORE: f64 = 7.0;

/// Lowest score a course can be completed with.
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a course can be completed with.
pub const MAX_SCORE: f64 = 10.0;

/// Enrolled-course count from which a BASIC student is listed as close to an upgrade.
pub const NEAR_UPGRADE_MIN_COURSES: i64 = 10;

// ---------------------------------------------------------------------------
// Plan enum
// ---------------------------------------------------------------------------

/// Service tier of a student.
///
/// Discriminants match the seed order of the `plans` lookup table.
#[repr(i16)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    #[default]
    Basic = 1,
    Premium = 2,
}

impl Plan {
    /// Return the `plans.id` value for this tier.
    pub fn id(self) -> i16 {
        self as i16
    }

    /// Resolve a `plans.id` value. Returns `None` for unknown ids.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Self::Basic),
            2 => Some(Self::Premium),
            _ => None,
        }
    }

    /// Wire/storage name (`"BASIC"` / `"PREMIUM"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Premium => "PREMIUM",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Map an approved-course count to the plan the student is entitled to.
pub fn evaluate_plan(approved: u32) -> Plan {
    if approved >= PREMIUM_REQUIRED_APPROVED_COURSES {
        Plan::Premium
    } else {
        Plan::Basic
    }
}

/// Whether a final score meets the passing bar.
pub fn is_passing_score(score: f64) -> bool {
    score >= PASSING_SCORE
}

/// Outcome of a plan re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanChange {
    pub previous: Plan,
    pub current: Plan,
}

impl PlanChange {
    /// True when the evaluation moved the student to a different plan.
    pub fn is_transition(&self) -> bool {
        self.previous != self.current
    }

    pub fn is_upgrade(&self) -> bool {
        self.previous == Plan::Basic && self.current == Plan::Premium
    }

    pub fn is_downgrade(&self) -> bool {
        self.previous == Plan::Premium && self.current == Plan::Basic
    }
}
