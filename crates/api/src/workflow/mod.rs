//! Workflow usecases.
//!
//! Each usecase sequences repository calls around the pure rules in
//! `bidflow_core`: load current state, check the rules, mutate, re-read.
//! Multi-statement mutations run in one transaction; returning early with
//! `?` drops the uncommitted transaction, which rolls it back.

pub mod boq;
pub mod contract;
pub mod general_cost;
pub mod invoice;
pub mod project;
pub mod quotation;

use bidflow_core::types::DbId;
use bidflow_db::models::project::ProjectStatusSnapshot;
use bidflow_db::repositories::ProjectRepo;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

/// Lock a project row and read the status of everything it owns.
async fn lock_project(
    conn: &mut PgConnection,
    project_id: DbId,
) -> AppResult<ProjectStatusSnapshot> {
    ProjectRepo::status_snapshot_for_update(&mut *conn, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))
}
