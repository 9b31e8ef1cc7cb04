//! Course row model, request DTOs, and search filters.

use enroll_core::course::Course;
use enroll_core::plan::is_passing_score;
use enroll_core::types::{DbId, Timestamp};
use enroll_core::validation::validate_not_blank;
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: DbId,
    pub student_id: DbId,
    pub name: String,
    pub score: f64,
    pub completed: bool,
    /// Zero-based insertion order within the owning student.
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CourseRow {
    pub fn is_approved(&self) -> bool {
        self.completed && is_passing_score(self.score)
    }

    pub fn into_course(self) -> Course {
        Course::restore(self.id, self.name, self.score, self.completed)
    }
}

/// DTO for enrolling a student in a new course.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourse {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

/// DTO for completing a course with a final score.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompleteCourse {
    #[validate(
        required(message = "score is required"),
        range(min = 0.0, max = 10.0, message = "score must be between 0.0 and 10.0")
    )]
    pub score: Option<f64>,
}

/// Completion state used to filter course searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseState {
    /// Completed, any score.
    Completed,
    /// Not yet completed.
    InProgress,
    /// Completed with a passing score.
    Approved,
    /// Completed below the passing score.
    Failed,
}

/// Query filters for searching courses (`?name=&state=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    /// Case-insensitive substring match on the course name.
    pub name: Option<String>,
    pub state: Option<CourseState>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
