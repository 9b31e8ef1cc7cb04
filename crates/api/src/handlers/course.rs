//! Handlers for courses: enrollment and completion under `/students/{id}`,
//! plus the cross-student `/courses` queries.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use enroll_core::course::Course;
use enroll_core::types::DbId;
use enroll_db::models::course::{CompleteCourse, CourseFilter, CreateCourse};
use enroll_db::repositories::{CourseRepo, StudentRepo};

use super::{log_plan_change, student_not_found};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::response::{ApprovedCountResponse, CourseSearchResponse, DataResponse, StudentResponse};
use crate::state::AppState;

/// POST /api/v1/students/{id}/courses
///
/// Appends a new, uncompleted course and returns the updated student. The
/// plan is not re-evaluated since a new course cannot be approved yet.
pub async fn add_course(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<CreateCourse>,
) -> AppResult<(StatusCode, Json<DataResponse<StudentResponse>>)> {
    let course = Course::create(input.name)?;

    let mut tx = state.pool.begin().await?;
    if !StudentRepo::lock_for_update(&mut *tx, id).await? {
        return Err(student_not_found(id));
    }
    let row = CourseRepo::create(&mut *tx, id, &course).await?;
    let student = StudentRepo::load_aggregate(&mut tx, id)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    tx.commit().await?;

    tracing::debug!(student_id = id, course_id = row.id, "Course added");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: StudentResponse::from(&student),
        }),
    ))
}

/// PUT /api/v1/students/{id}/courses/{course_id}/complete
///
/// Records the final score and re-evaluates the plan in the same
/// transaction, so reaching the twelfth approved course upgrades at once.
pub async fn complete_course(
    State(state): State<AppState>,
    ApiPath((id, course_id)): ApiPath<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<CompleteCourse>,
) -> AppResult<Json<DataResponse<StudentResponse>>> {
    let score = input
        .score
        .ok_or_else(|| AppError::BadRequest("score is required".into()))?;

    let mut tx = state.pool.begin().await?;
    if !StudentRepo::lock_for_update(&mut *tx, id).await? {
        return Err(student_not_found(id));
    }
    let mut student = StudentRepo::load_aggregate(&mut tx, id)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    let change = student.complete_course(course_id, score)?;
    // `complete_course` has already rejected ids the student does not own.
    let course = student.course(course_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Course {course_id} missing from student {id} after completion"
        ))
    })?;
    CourseRepo::save_completion(&mut *tx, course_id, course.score(), course.is_completed())
        .await?;
    StudentRepo::save_plan(&mut *tx, id, student.plan(), student.premium_benefits_active())
        .await?;
    tx.commit().await?;

    tracing::debug!(student_id = id, course_id, score, "Course completed");
    log_plan_change(id, change);
    Ok(Json(DataResponse {
        data: StudentResponse::from(&student),
    }))
}

/// GET /api/v1/courses
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<CourseFilter>,
) -> AppResult<Json<DataResponse<Vec<CourseSearchResponse>>>> {
    let rows = CourseRepo::search(&state.pool, &filter).await?;
    Ok(Json(DataResponse {
        data: rows.into_iter().map(CourseSearchResponse::from).collect(),
    }))
}

/// GET /api/v1/courses/approved-count
pub async fn approved_count(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ApprovedCountResponse>>> {
    let approved_courses = CourseRepo::count_approved(&state.pool).await?;
    Ok(Json(DataResponse {
        data: ApprovedCountResponse { approved_courses },
    }))
}
