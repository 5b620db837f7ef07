//! Repositories for the `jobs`, `materials` and `job_materials` tables.

use bidflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::catalog::{
    CreateJob, CreateJobMaterial, CreateMaterial, Job, JobMaterial, Material,
};

const JOB_COLUMNS: &str = "id, name, unit, description, created_at, updated_at";
const MATERIAL_COLUMNS: &str = "id, name, unit, created_at, updated_at";

pub struct JobRepo;

impl JobRepo {
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (name, unit, description) VALUES ($1, $2, $3)
             RETURNING {JOB_COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(&input.name)
            .bind(&input.unit)
            .bind(&input.description)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY name");
        sqlx::query_as::<_, Job>(&query).fetch_all(executor).await
    }

    /// Link a material to a job, replacing the quantity if already linked.
    pub async fn upsert_material(
        executor: impl PgExecutor<'_>,
        job_id: DbId,
        input: &CreateJobMaterial,
    ) -> Result<JobMaterial, sqlx::Error> {
        sqlx::query_as::<_, JobMaterial>(
            "INSERT INTO job_materials (job_id, material_id, quantity) VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_job_materials_job_material
             DO UPDATE SET quantity = EXCLUDED.quantity
             RETURNING job_id, material_id, quantity",
        )
        .bind(job_id)
        .bind(input.material_id)
        .bind(input.quantity)
        .fetch_one(executor)
        .await
    }

    pub async fn list_materials(
        executor: impl PgExecutor<'_>,
        job_id: DbId,
    ) -> Result<Vec<JobMaterial>, sqlx::Error> {
        sqlx::query_as::<_, JobMaterial>(
            "SELECT job_id, material_id, quantity FROM job_materials
             WHERE job_id = $1 ORDER BY material_id",
        )
        .bind(job_id)
        .fetch_all(executor)
        .await
    }
}

pub struct MaterialRepo;

impl MaterialRepo {
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateMaterial,
    ) -> Result<Material, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials (name, unit) VALUES ($1, $2) RETURNING {MATERIAL_COLUMNS}"
        );
        sqlx::query_as::<_, Material>(&query)
            .bind(&input.name)
            .bind(&input.unit)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Material>, sqlx::Error> {
        let query = format!("SELECT {MATERIAL_COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, Material>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Material>, sqlx::Error> {
        let query = format!("SELECT {MATERIAL_COLUMNS} FROM materials ORDER BY name");
        sqlx::query_as::<_, Material>(&query).fetch_all(executor).await
    }
}
