//! Route definitions for the `/students` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{course, student};
use crate::state::AppState;

/// Routes mounted at `/students`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /near-upgrade                      -> near_upgrade
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// POST   /{id}/courses                      -> add_course
/// PUT    /{id}/courses/{course_id}/complete -> complete_course
/// GET    /{id}/progress                     -> progress
/// POST   /{id}/plan/refresh                 -> refresh_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(student::list).post(student::create))
        .route("/near-upgrade", get(student::near_upgrade))
        .route(
            "/{id}",
            get(student::get_by_id)
                .put(student::update)
                .delete(student::delete),
        )
        .route("/{id}/courses", post(course::add_course))
        .route(
            "/{id}/courses/{course_id}/complete",
            put(course::complete_course),
        )
        .route("/{id}/progress", get(student::progress))
        .route("/{id}/plan/refresh", post(student::refresh_plan))
}
