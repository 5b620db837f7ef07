//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::project_summary::ProjectSummary;
use bidflow_core::types::DbId;
use bidflow_db::models::project::{CreateProject, Project, UpdateProjectStatus};
use bidflow_db::repositories::{ClientRepo, ProjectRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::project::{self as usecase, ProjectOverview};

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.validate()?;
    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if end < start {
            return Err(
                CoreError::Validation("end_date must not be before start_date".into()).into(),
            );
        }
    }
    if let Some(client_id) = input.client_id {
        ClientRepo::find_by_id(&state.pool, client_id)
            .await?
            .ok_or(AppError::not_found("Client", client_id))?;
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(project))))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(DataResponse::new(project)))
}

/// PUT /api/v1/projects/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectStatus>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = usecase::update_status(&state.pool, id, input.status).await?;
    Ok(Json(DataResponse::new(project)))
}

/// GET /api/v1/projects/{id}/overview
pub async fn overview(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectOverview>>> {
    let overview = usecase::overview(&state.pool, id).await?;
    Ok(Json(DataResponse::new(overview)))
}

/// GET /api/v1/projects/{id}/summary
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectSummary>>> {
    let summary = usecase::summary(&state.pool, id).await?;
    Ok(Json(DataResponse::new(summary)))
}
