//! Course entity owned by a student.

use crate::error::CoreError;
use crate::plan::{is_passing_score, MAX_SCORE, MIN_SCORE};
use crate::types::DbId;

/// A course a student is enrolled in.
///
/// `name` is fixed at creation. `score` and `completed` change only through
/// [`Course::complete`]; completing again overwrites the previous result.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: Option<DbId>,
    name: String,
    score: f64,
    completed: bool,
}

impl Course {
    /// Create a new, uncompleted course with a score of 0.0.
    pub fn create(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Course name must not be blank".into()));
        }
        Ok(Self {
            id: None,
            name,
            score: MIN_SCORE,
            completed: false,
        })
    }

    /// Rebuild a course that was already persisted.
    pub fn restore(id: DbId, name: String, score: f64, completed: bool) -> Self {
        Self {
            id: Some(id),
            name,
            score,
            completed,
        }
    }

    /// Record a final score and mark the course completed.
    ///
    /// Does not touch the owning student's plan.
    pub fn complete(&mut self, score: f64) -> Result<(), CoreError> {
        validate_score(score)?;
        self.score = score;
        self.completed = true;
        Ok(())
    }

    /// Completed with a passing score.
    pub fn is_approved(&self) -> bool {
        self.completed && is_passing_score(self.score)
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Reject scores outside `[MIN_SCORE, MAX_SCORE]` (and NaN).
pub fn validate_score(score: f64) -> Result<(), CoreError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Score must be between {MIN_SCORE:.1} and {MAX_SCORE:.1}, got {score}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_course_starts_uncompleted_at_zero() {
        let course = Course::create("Algebra").unwrap();
        assert_eq!(course.name(), "Algebra");
        assert_eq!(course.score(), 0.0);
        assert!(!course.is_completed());
        assert!(!course.is_approved());
        assert_eq!(course.id(), None);
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_matches!(Course::create("   "), Err(CoreError::Validation(_)));
        assert_matches!(Course::create(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn completing_with_passing_score_approves() {
        let mut course = Course::create("Physics").unwrap();
        course.complete(7.0).unwrap();
        assert!(course.is_completed());
        assert!(course.is_approved());
    }

    #[test]
    fn completing_below_passing_score_does_not_approve() {
        let mut course = Course::create("Physics").unwrap();
        course.complete(6.9).unwrap();
        assert!(course.is_completed());
        assert!(!course.is_approved());
    }

    #[test]
    fn uncompleted_course_with_high_score_is_not_approved() {
        let course = Course::restore(1, "History".into(), 9.5, false);
        assert!(!course.is_approved());
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let mut course = Course::create("Chemistry").unwrap();
        assert_matches!(course.complete(-0.1), Err(CoreError::Validation(_)));
        assert_matches!(course.complete(10.1), Err(CoreError::Validation(_)));
        assert_matches!(course.complete(f64::NAN), Err(CoreError::Validation(_)));
        assert!(!course.is_completed());
    }

    #[test]
    fn boundary_scores_are_accepted() {
        let mut course = Course::create("Chemistry").unwrap();
        course.complete(0.0).unwrap();
        assert!(!course.is_approved());
        course.complete(10.0).unwrap();
        assert!(course.is_approved());
    }

    #[test]
    fn recompletion_overwrites_previous_result() {
        let mut course = Course::create("Biology").unwrap();
        course.complete(9.0).unwrap();
        course.complete(5.0).unwrap();
        assert_eq!(course.score(), 5.0);
        assert!(!course.is_approved());
    }
}
