//! Repository for the `courses` table.

use enroll_core::course::Course;
use enroll_core::plan::PASSING_SCORE;
use enroll_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::course::{CourseFilter, CourseRow, CourseState};
use crate::repositories::{clamp_limit, clamp_offset, contains_pattern};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, name, score, completed, position, created_at, updated_at";

/// Provides persistence for courses owned by students.
pub struct CourseRepo;

impl CourseRepo {
    /// Append a course to a student's collection, returning the created row.
    ///
    /// The course is placed after the student's current last course. Callers
    /// adding courses concurrently must hold the student row lock.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: DbId,
        course: &Course,
    ) -> Result<CourseRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (student_id, name, score, completed, position)
             VALUES ($1, $2, $3, $4,
                     COALESCE((SELECT MAX(position) + 1 FROM courses WHERE student_id = $1), 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CourseRow>(&query)
            .bind(student_id)
            .bind(course.name())
            .bind(course.score())
            .bind(course.is_completed())
            .fetch_one(executor)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CourseRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, CourseRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a student's courses in insertion order.
    pub async fn list_by_student<'e, E: PgExecutor<'e>>(
        executor: E,
        student_id: DbId,
    ) -> Result<Vec<CourseRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE student_id = $1 ORDER BY position, id"
        );
        sqlx::query_as::<_, CourseRow>(&query)
            .bind(student_id)
            .fetch_all(executor)
            .await
    }

    /// List courses for several students at once, grouped by student then position.
    pub async fn list_by_students<'e, E: PgExecutor<'e>>(
        executor: E,
        student_ids: &[DbId],
    ) -> Result<Vec<CourseRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE student_id = ANY($1)
             ORDER BY student_id, position, id"
        );
        sqlx::query_as::<_, CourseRow>(&query)
            .bind(student_ids)
            .fetch_all(executor)
            .await
    }

    /// Persist a course's completion result (score and completed flag).
    ///
    /// Returns `false` if the course row no longer exists.
    pub async fn save_completion<'e, E: PgExecutor<'e>>(
        executor: E,
        course_id: DbId,
        score: f64,
        completed: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE courses SET score = $2, completed = $3 WHERE id = $1")
            .bind(course_id)
            .bind(score)
            .bind(completed)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search courses across all students by name and completion state.
    ///
    /// The name filter is a literal, case-insensitive substring match.
    pub async fn search(pool: &PgPool, filter: &CourseFilter) -> Result<Vec<CourseRow>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.name.is_some() {
            conditions.push(format!("name ILIKE ${bind_idx} ESCAPE '\\'"));
            bind_idx += 1;
        }
        match filter.state {
            Some(CourseState::Completed) => conditions.push("completed = true".to_string()),
            Some(CourseState::InProgress) => conditions.push("completed = false".to_string()),
            Some(CourseState::Approved) => {
                conditions.push(format!("completed = true AND score >= ${bind_idx}"));
                bind_idx += 1;
            }
            Some(CourseState::Failed) => {
                conditions.push(format!("completed = true AND score < ${bind_idx}"));
                bind_idx += 1;
            }
            None => {}
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM courses {where_clause} \
             ORDER BY student_id, position, id \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, CourseRow>(&query);
        if let Some(ref name) = filter.name {
            q = q.bind(contains_pattern(name));
        }
        if matches!(
            filter.state,
            Some(CourseState::Approved) | Some(CourseState::Failed)
        ) {
            q = q.bind(PASSING_SCORE);
        }
        q = q
            .bind(clamp_limit(filter.limit))
            .bind(clamp_offset(filter.offset));
        q.fetch_all(pool).await
    }

    /// Count approved courses (completed with a passing score) across all students.
    pub async fn count_approved(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM courses WHERE completed = true AND score >= $1")
                .bind(PASSING_SCORE)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
