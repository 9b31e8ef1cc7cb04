//! Repository for the `students` table and the student aggregate.

use std::collections::HashMap;

use enroll_core::plan::{Plan, NEAR_UPGRADE_MIN_COURSES};
use enroll_core::student::Student;
use enroll_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::course::CourseRow;
use crate::models::student::{StudentFilter, StudentRow, UpdateStudent};
use crate::repositories::{clamp_limit, clamp_offset, CourseRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, document_number, email, plan_id, premium_benefits_active, \
    registered_on, created_at, updated_at";

/// Provides CRUD operations for students and loading of full aggregates.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a newly registered student, returning the created row.
    ///
    /// Courses on the aggregate are not inserted; new students have none.
    pub async fn create(pool: &PgPool, student: &Student) -> Result<StudentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO students
                (name, document_number, email, plan_id, premium_benefits_active, registered_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(student.name())
            .bind(student.document().as_str())
            .bind(student.email().as_str())
            .bind(student.plan().id())
            .bind(student.premium_benefits_active())
            .bind(student.registered_on())
            .fetch_one(pool)
            .await
    }

    /// Find a student row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists_by_document_number(
        pool: &PgPool,
        document_number: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM students WHERE document_number = $1)")
                .bind(document_number)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM students WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List students ordered by ID, optionally filtered by plan and benefit flag.
    pub async fn list(pool: &PgPool, filter: &StudentFilter) -> Result<Vec<StudentRow>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.plan.is_some() {
            conditions.push(format!("plan_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.premium_benefits_active.is_some() {
            conditions.push(format!("premium_benefits_active = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM students {where_clause} \
             ORDER BY id \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, StudentRow>(&query);
        if let Some(plan) = filter.plan {
            q = q.bind(plan.id());
        }
        if let Some(active) = filter.premium_benefits_active {
            q = q.bind(active);
        }
        q = q
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset));
        q.fetch_all(pool).await
    }

    /// BASIC students enrolled in at least [`NEAR_UPGRADE_MIN_COURSES`] courses.
    ///
    /// Counts enrolled courses, not approved ones.
    pub async fn list_near_upgrade(pool: &PgPool) -> Result<Vec<StudentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students s
             WHERE s.plan_id = $1
               AND (SELECT COUNT(*) FROM courses c WHERE c.student_id = s.id) >= $2
             ORDER BY s.id"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(Plan::Basic.id())
            .bind(NEAR_UPGRADE_MIN_COURSES)
            .fetch_all(pool)
            .await
    }

    /// Update a student. Only `name` is mutable; `None` keeps the current value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<StudentRow>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a student and (by cascade) their courses.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Take a row lock on a student for the rest of the caller's transaction.
    ///
    /// Serializes read-modify-write operations on one aggregate. Returns
    /// `false` if the student does not exist.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM students WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.is_some())
    }

    /// Write the evaluated plan and benefit flag for a student.
    pub async fn save_plan<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        plan: Plan,
        premium_benefits_active: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET plan_id = $2, premium_benefits_active = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(plan.id())
        .bind(premium_benefits_active)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load a student with all of their courses.
    pub async fn load_aggregate(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, StudentRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let courses = CourseRepo::list_by_student(&mut *conn, id).await?;
        row.into_aggregate(courses)
            .map(Some)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    /// Attach courses to already-fetched student rows, keeping row order.
    pub async fn load_aggregates(
        pool: &PgPool,
        rows: Vec<StudentRow>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_student: HashMap<DbId, Vec<CourseRow>> = HashMap::new();
        for course in CourseRepo::list_by_students(pool, &ids).await? {
            by_student.entry(course.student_id).or_default().push(course);
        }

        rows.into_iter()
            .map(|row| {
                let courses = by_student.remove(&row.id).unwrap_or_default();
                row.into_aggregate(courses)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))
            })
            .collect()
    }
}
