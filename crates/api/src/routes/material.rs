use axum::routing::get;
use axum::Router;

use crate::handlers::material;
use crate::state::AppState;

/// Routes mounted at `/materials`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(material::list).post(material::create))
}
