use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::general_cost;
use crate::state::AppState;

/// Routes mounted at `/general-costs`.
///
/// ```text
/// GET    /boq/{boq_id}       -> list_for_boq (synchronizes first)
/// POST   /boq/{boq_id}       -> create
/// DELETE /{id}               -> delete
/// PUT    /{id}/estimated     -> update_estimated
/// PUT    /{id}/actual        -> update_actual
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/boq/{boq_id}",
            get(general_cost::list_for_boq).post(general_cost::create),
        )
        .route("/{id}", delete(general_cost::delete))
        .route("/{id}/estimated", put(general_cost::update_estimated))
        .route("/{id}/actual", put(general_cost::update_actual))
}
