//! Liveness and readiness of the bidding service.
//!
//! Besides database reachability the check reports how many general-cost
//! types the catalog holds. Every BOQ gets one general cost per type, so an
//! empty catalog means the seed migration never ran.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use bidflow_db::repositories::CostTypeRepo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable or the type
    /// catalog is empty.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Number of general-cost types; `None` when the query failed.
    pub cost_types: Option<usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = bidflow_db::health_check(&state.pool).await.is_ok();
    let cost_types = if db_healthy {
        match CostTypeRepo::list(&state.pool).await {
            Ok(types) => Some(types.len()),
            Err(err) => {
                tracing::warn!(error = %err, "Health check could not read the type catalog");
                None
            }
        }
    } else {
        None
    };
    let status = match cost_types {
        Some(count) if count > 0 => "ok",
        _ => "degraded",
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cost_types,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
