use axum::routing::{get, put};
use axum::Router;

use crate::handlers::invoice;
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// `POST /{id}` takes a project id: it shares the path pattern with the
/// single-invoice routes, which take an invoice id.
///
/// ```text
/// POST   /{id}                     -> create_for_all_periods (project id)
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// PUT    /{id}/status              -> update_status
/// GET    /project/{project_id}     -> list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/{project_id}", get(invoice::list_by_project))
        .route(
            "/{id}",
            get(invoice::get_by_id)
                .post(invoice::create_for_all_periods)
                .put(invoice::update)
                .delete(invoice::delete),
        )
        .route("/{id}/status", put(invoice::update_status))
}
