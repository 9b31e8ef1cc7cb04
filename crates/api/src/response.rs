//! Response payloads for API handlers.
//!
//! Successful responses use a `{ "data": ... }` envelope via [`DataResponse`].

use enroll_core::course::Course;
use enroll_core::plan::Plan;
use enroll_core::student::Student;
use enroll_core::types::{Date, DbId};
use enroll_db::models::course::CourseRow;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A student with their courses as seen by API clients.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: Option<DbId>,
    pub name: String,
    /// Rendered as `NNN.NNN.NNN-NN`.
    pub document_number: String,
    pub email: String,
    pub plan: Plan,
    pub registered_on: Date,
    pub premium_benefits_active: bool,
    pub approved_courses: u32,
    pub courses: Vec<CourseResponse>,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            name: student.name().to_string(),
            document_number: student.document().formatted(),
            email: student.email().to_string(),
            plan: student.plan(),
            registered_on: student.registered_on(),
            premium_benefits_active: student.premium_benefits_active(),
            approved_courses: student.count_approved_courses(),
            courses: student.courses().iter().map(CourseResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: Option<DbId>,
    pub name: String,
    pub score: f64,
    pub completed: bool,
    pub approved: bool,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            name: course.name().to_string(),
            score: course.score(),
            completed: course.is_completed(),
            approved: course.is_approved(),
        }
    }
}

/// A course search hit, which also names its owning student.
#[derive(Debug, Serialize)]
pub struct CourseSearchResponse {
    pub id: DbId,
    pub student_id: DbId,
    pub name: String,
    pub score: f64,
    pub completed: bool,
    pub approved: bool,
}

impl From<CourseRow> for CourseSearchResponse {
    fn from(row: CourseRow) -> Self {
        let approved = row.is_approved();
        Self {
            id: row.id,
            student_id: row.student_id,
            name: row.name,
            score: row.score,
            completed: row.completed,
            approved,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApprovedCountResponse {
    pub approved_courses: i64,
}
