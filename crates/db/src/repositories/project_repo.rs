//! Repository for the `projects` table.

use bidflow_core::status::ProjectStatus;
use bidflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::project::{CreateProject, Project, ProjectStatusSnapshot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_id, name, address, status, start_date, end_date, created_at, updated_at";

/// Provides create/read and status operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project in `planning` status, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (client_id, name, address, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(executor).await
    }

    /// Read the project status together with its BOQ, quotation and contract,
    /// locking the project row until the surrounding transaction ends.
    pub async fn status_snapshot_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<ProjectStatusSnapshot>, sqlx::Error> {
        sqlx::query_as::<_, ProjectStatusSnapshot>(
            "SELECT p.status AS project_status,
                    b.status AS boq_status,
                    q.status AS quotation_status,
                    c.id AS contract_id
             FROM projects p
             LEFT JOIN boqs b ON b.project_id = p.id
             LEFT JOIN quotations q ON q.project_id = p.id
             LEFT JOIN contracts c ON c.project_id = p.id
             WHERE p.id = $1
             FOR UPDATE OF p",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Set the project status. Returns `None` if no row with `id` exists.
    pub async fn update_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }
}
