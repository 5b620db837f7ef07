use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::boq;
use crate::state::AppState;

/// Routes mounted at `/boqs`.
///
/// ```text
/// GET    /project/{project_id}      -> get_for_project
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PUT    /{id}/approve              -> approve
/// POST   /{id}/jobs                 -> add_job
/// PUT    /{id}/jobs/{boq_job_id}    -> update_job
/// DELETE /{id}/jobs/{boq_job_id}    -> remove_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/project/{project_id}", get(boq::get_for_project))
        .route("/{id}", get(boq::get_by_id).put(boq::update))
        .route("/{id}/approve", put(boq::approve))
        .route("/{id}/jobs", post(boq::add_job))
        .route(
            "/{id}/jobs/{boq_job_id}",
            put(boq::update_job).delete(boq::remove_job),
        )
}
