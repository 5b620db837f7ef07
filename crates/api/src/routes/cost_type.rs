use axum::routing::get;
use axum::Router;

use crate::handlers::cost_type;
use crate::state::AppState;

/// Routes mounted at `/types`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(cost_type::list).post(cost_type::create))
}
