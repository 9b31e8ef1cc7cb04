//! Route definitions for cross-student course queries.

use axum::routing::get;
use axum::Router;

use crate::handlers::course;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                  -> search (?name=&state=&limit=&offset=)
/// GET    /approved-count    -> approved_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(course::search))
        .route("/approved-count", get(course::approved_count))
}
