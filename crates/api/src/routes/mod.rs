pub mod courses;
pub mod health;
pub mod students;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /students                                        list, create
/// /students/near-upgrade                           BASIC students close to PREMIUM
/// /students/{id}                                   get, update, delete
/// /students/{id}/courses                           add course (POST)
/// /students/{id}/courses/{course_id}/complete      complete course (PUT)
/// /students/{id}/progress                          progress summary
/// /students/{id}/plan/refresh                      re-evaluate plan (POST)
///
/// /courses                                         search
/// /courses/approved-count                          global approved count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/students", students::router())
        .nest("/courses", courses::router())
}
