//! Project entity model and DTOs.

use bidflow_core::status::{DocumentStatus, ProjectStatus};
use bidflow_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: Option<DbId>,
    pub name: String,
    pub address: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project. Status always starts at `planning`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub client_id: Option<DbId>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Request body for `PUT /projects/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
}

/// Status of everything a project owns, read in one query.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectStatusSnapshot {
    #[sqlx(try_from = "String")]
    pub project_status: ProjectStatus,
    pub boq_status: Option<String>,
    pub quotation_status: Option<String>,
    pub contract_id: Option<DbId>,
}

impl ProjectStatusSnapshot {
    pub fn boq(&self) -> Result<Option<DocumentStatus>, bidflow_core::error::CoreError> {
        self.boq_status.as_deref().map(str::parse).transpose()
    }

    pub fn quotation(&self) -> Result<Option<DocumentStatus>, bidflow_core::error::CoreError> {
        self.quotation_status.as_deref().map(str::parse).transpose()
    }
}
