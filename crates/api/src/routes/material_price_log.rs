use axum::routing::{get, post};
use axum::Router;

use crate::handlers::material_price_log;
use crate::state::AppState;

/// Routes mounted at `/material-price-logs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(material_price_log::create))
        .route("/boq/{boq_id}", get(material_price_log::list_by_boq))
}
