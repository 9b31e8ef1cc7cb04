//! Student row model, request DTOs, and list filters.

use enroll_core::course::Course;
use enroll_core::document::DocumentNumber;
use enroll_core::email::Email;
use enroll_core::error::CoreError;
use enroll_core::plan::Plan;
use enroll_core::student::{StoredStudent, Student};
use enroll_core::types::{Date, DbId, Timestamp};
use enroll_core::validation::{validate_document_number, validate_email, validate_not_blank};
use serde::Deserialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::course::CourseRow;

/// A row from the `students` table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub id: DbId,
    pub name: String,
    pub document_number: String,
    pub email: String,
    pub plan_id: i16,
    pub premium_benefits_active: bool,
    pub registered_on: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StudentRow {
    /// Build the domain aggregate from this row and its course rows.
    ///
    /// `courses` must already be in display order. Fails only when stored
    /// data violates a domain rule (unknown plan id, malformed contact data).
    pub fn into_aggregate(self, courses: Vec<CourseRow>) -> Result<Student, CoreError> {
        let plan = Plan::from_id(self.plan_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "Student {} has unknown plan_id {}",
                self.id, self.plan_id
            ))
        })?;
        Ok(Student::restore(StoredStudent {
            id: self.id,
            name: self.name,
            document: DocumentNumber::parse(&self.document_number)?,
            email: Email::parse(&self.email)?,
            plan,
            premium_benefits_active: self.premium_benefits_active,
            registered_on: self.registered_on,
            courses: courses.into_iter().map(CourseRow::into_course).collect::<Vec<Course>>(),
        }))
    }
}

/// DTO for registering a new student.
///
/// Missing fields deserialize as empty strings so they are reported by the
/// field validators instead of failing JSON parsing.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Exactly 11 digits, unformatted.
    #[serde(default)]
    #[validate(custom(function = "validate_document_number"))]
    pub document_number: String,
    #[serde(default)]
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

/// DTO for updating a student. Document number and email are immutable.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
}

/// Query filters for listing students (`?plan=&premium_benefits_active=&limit=&offset=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    pub plan: Option<Plan>,
    pub premium_benefits_active: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
