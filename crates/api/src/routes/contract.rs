use axum::routing::post;
use axum::Router;

use crate::handlers::contract;
use crate::state::AppState;

/// Routes mounted at `/contracts`.
///
/// ```text
/// POST   /projects/{project_id}   -> create
/// GET    /projects/{project_id}   -> get_for_project
/// POST   /{id}/periods            -> create_period
/// GET    /{id}/periods            -> list_periods
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{project_id}",
            post(contract::create).get(contract::get_for_project),
        )
        .route(
            "/{id}/periods",
            post(contract::create_period).get(contract::list_periods),
        )
}
