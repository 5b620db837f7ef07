use axum::routing::{get, put};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}/status     -> update_status
/// GET    /{id}/overview   -> overview
/// GET    /{id}/summary    -> summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id))
        .route("/{id}/status", put(project::update_status))
        .route("/{id}/overview", get(project::overview))
        .route("/{id}/summary", get(project::summary))
}
