//! Student aggregate: identity, plan state, and owned courses.
//!
//! The aggregate owns the plan-upgrade rule. `plan` and
//! `premium_benefits_active` are only written by [`Student::refresh_plan`],
//! so after every evaluation `premium_benefits_active == (plan == Premium)`.

use crate::course::Course;
use crate::document::DocumentNumber;
use crate::email::Email;
use crate::error::CoreError;
use crate::plan::{evaluate_plan, Plan, PlanChange};
use crate::types::{Date, DbId};

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: Option<DbId>,
    name: String,
    document: DocumentNumber,
    email: Email,
    plan: Plan,
    premium_benefits_active: bool,
    registered_on: Date,
    courses: Vec<Course>,
}

/// Persisted state used to rebuild a [`Student`] without re-running rules.
#[derive(Debug, Clone)]
pub struct StoredStudent {
    pub id: DbId,
    pub name: String,
    pub document: DocumentNumber,
    pub email: Email,
    pub plan: Plan,
    pub premium_benefits_active: bool,
    pub registered_on: Date,
    pub courses: Vec<Course>,
}

impl Student {
    /// Register a new student on the BASIC plan with no courses.
    pub fn register(
        name: impl Into<String>,
        document: DocumentNumber,
        email: Email,
        registered_on: Date,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: None,
            name,
            document,
            email,
            plan: Plan::Basic,
            premium_benefits_active: false,
            registered_on,
            courses: Vec::new(),
        })
    }

    /// Rebuild a persisted student exactly as stored.
    ///
    /// The stored plan flags are kept as-is; call [`Student::refresh_plan`]
    /// to re-evaluate them.
    pub fn restore(stored: StoredStudent) -> Self {
        Self {
            id: Some(stored.id),
            name: stored.name,
            document: stored.document,
            email: stored.email,
            plan: stored.plan,
            premium_benefits_active: stored.premium_benefits_active,
            registered_on: stored.registered_on,
            courses: stored.courses,
        }
    }

    /// Append a course. Names need not be unique; the plan is not re-evaluated.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// Number of courses completed with a passing score.
    pub fn count_approved_courses(&self) -> u32 {
        self.courses.iter().filter(|c| c.is_approved()).count() as u32
    }

    /// Recompute the plan from the current approved-course count.
    ///
    /// Moves the student to PREMIUM at or above the threshold and back to
    /// BASIC below it, regardless of the previous plan.
    pub fn refresh_plan(&mut self) -> PlanChange {
        let previous = self.plan;
        let current = evaluate_plan(self.count_approved_courses());
        self.plan = current;
        self.premium_benefits_active = current == Plan::Premium;
        PlanChange { previous, current }
    }

    /// Complete an owned course with `score` and re-evaluate the plan.
    pub fn complete_course(&mut self, course_id: DbId, score: f64) -> Result<PlanChange, CoreError> {
        let course = self
            .courses
            .iter_mut()
            .find(|c| c.id() == Some(course_id))
            .ok_or(CoreError::NotFound {
                entity: "Course",
                id: course_id,
            })?;
        course.complete(score)?;
        Ok(self.refresh_plan())
    }

    /// Rename the student. Blank names are rejected.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), CoreError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn id(&self) -> Option<DbId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &DocumentNumber {
        &self.document
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn premium_benefits_active(&self) -> bool {
        self.premium_benefits_active
    }

    pub fn registered_on(&self) -> Date {
        self.registered_on
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Look up an owned course by its identifier.
    pub fn course(&self, course_id: DbId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == Some(course_id))
    }
}

fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Student name must not be blank".into()));
    }
    Ok(())
}
