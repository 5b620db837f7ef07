use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::quotation;
use crate::state::AppState;

/// Routes mounted at `/quotations`.
///
/// ```text
/// POST   /projects/{project_id}            -> compute (create-or-get)
/// GET    /projects/{project_id}            -> get
/// PUT    /projects/{project_id}            -> update
/// PUT    /projects/{project_id}/approve    -> approve
/// GET    /projects/{project_id}/export     -> export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}",
            post(quotation::compute)
                .get(quotation::get)
                .put(quotation::update),
        )
        .route("/projects/{project_id}/approve", put(quotation::approve))
        .route("/projects/{project_id}/export", get(quotation::export))
}
