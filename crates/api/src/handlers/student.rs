//! Handlers for the `/students` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use enroll_core::document::DocumentNumber;
use enroll_core::email::Email;
use enroll_core::error::CoreError;
use enroll_core::progress::ProgressSummary;
use enroll_core::student::Student;
use enroll_core::types::DbId;
use enroll_db::models::student::{CreateStudent, StudentFilter, UpdateStudent};
use enroll_db::repositories::StudentRepo;

use super::{log_plan_change, student_not_found};
use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::response::{DataResponse, StudentResponse};
use crate::state::AppState;

type StudentBody = Json<DataResponse<StudentResponse>>;

fn student_body(student: &Student) -> StudentBody {
    Json(DataResponse {
        data: StudentResponse::from(student),
    })
}

/// Load a full aggregate outside of any transaction.
async fn load(state: &AppState, id: DbId) -> AppResult<Student> {
    let mut conn = state.pool.acquire().await?;
    StudentRepo::load_aggregate(&mut conn, id)
        .await?
        .ok_or_else(|| student_not_found(id))
}

/// POST /api/v1/students
///
/// Registers the student on the BASIC plan. Duplicate document numbers or
/// emails are rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateStudent>,
) -> AppResult<(StatusCode, StudentBody)> {
    let document = DocumentNumber::parse(&input.document_number)?;
    let email = Email::parse(&input.email)?;

    if StudentRepo::exists_by_document_number(&state.pool, document.as_str()).await? {
        return Err(CoreError::Conflict("Document number already registered".into()).into());
    }
    if StudentRepo::exists_by_email(&state.pool, email.as_str()).await? {
        return Err(CoreError::Conflict("Email already registered".into()).into());
    }

    let student = Student::register(input.name, document, email, Utc::now().date_naive())?;
    let row = StudentRepo::create(&state.pool, &student).await?;
    let student = row.into_aggregate(Vec::new())?;

    tracing::info!(student_id = ?student.id(), "Student registered");
    Ok((StatusCode::CREATED, student_body(&student)))
}

/// GET /api/v1/students
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<StudentFilter>,
) -> AppResult<Json<DataResponse<Vec<StudentResponse>>>> {
    let rows = StudentRepo::list(&state.pool, &filter).await?;
    let students = StudentRepo::load_aggregates(&state.pool, rows).await?;
    Ok(Json(DataResponse {
        data: students.iter().map(StudentResponse::from).collect(),
    }))
}

/// GET /api/v1/students/near-upgrade
///
/// BASIC students who are enrolled in enough courses to be close to PREMIUM.
pub async fn near_upgrade(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<StudentResponse>>>> {
    let rows = StudentRepo::list_near_upgrade(&state.pool).await?;
    let students = StudentRepo::load_aggregates(&state.pool, rows).await?;
    Ok(Json(DataResponse {
        data: students.iter().map(StudentResponse::from).collect(),
    }))
}

/// GET /api/v1/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StudentBody> {
    let student = load(&state, id).await?;
    Ok(student_body(&student))
}

/// PUT /api/v1/students/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateStudent>,
) -> AppResult<StudentBody> {
    StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| student_not_found(id))?;
    let student = load(&state, id).await?;
    Ok(student_body(&student))
}

/// DELETE /api/v1/students/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if StudentRepo::delete(&state.pool, id).await? {
        tracing::info!(student_id = id, "Student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(student_not_found(id))
    }
}

/// GET /api/v1/students/{id}/progress
pub async fn progress(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<ProgressSummary>>> {
    let student = load(&state, id).await?;
    Ok(Json(DataResponse {
        data: ProgressSummary::for_student(&student),
    }))
}

/// POST /api/v1/students/{id}/plan/refresh
///
/// Re-runs plan evaluation under the student row lock and persists the result.
pub async fn refresh_plan(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StudentBody> {
    let mut tx = state.pool.begin().await?;
    if !StudentRepo::lock_for_update(&mut *tx, id).await? {
        return Err(student_not_found(id));
    }
    let mut student = StudentRepo::load_aggregate(&mut tx, id)
        .await?
        .ok_or_else(|| student_not_found(id))?;

    let change = student.refresh_plan();
    StudentRepo::save_plan(&mut *tx, id, student.plan(), student.premium_benefits_active())
        .await?;
    tx.commit().await?;

    log_plan_change(id, change);
    Ok(student_body(&student))
}
