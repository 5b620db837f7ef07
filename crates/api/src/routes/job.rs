use axum::routing::get;
use axum::Router;

use crate::handlers::job;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(job::list).post(job::create))
        .route("/{id}/materials", get(job::list_materials).post(job::add_material))
}
