//! Repository for the `boqs` and `boq_jobs` tables.

use bidflow_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::boq::{Boq, BoqJob, CreateBoqJob, UpdateBoq, UpdateBoqJob};

const COLUMNS: &str =
    "id, project_id, status, selling_general_cost, complete_step, created_at, updated_at";

/// Select list for a `boq_jobs` row aliased `bj` joined with `jobs j`.
const JOB_COLUMNS: &str = "bj.id, bj.boq_id, bj.job_id, j.name AS job_name, j.unit, \
    bj.quantity, bj.labor_cost, bj.selling_price, bj.created_at, bj.updated_at";

/// Provides BOQ access, including the atomic get-or-create by project.
pub struct BoqRepo;

impl BoqRepo {
    // ── BOQ ──────────────────────────────────────────────────────────

    /// Return the project's BOQ, creating a draft one if none exists.
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` on the one-BOQ-per-project
    /// constraint, so concurrent first reads converge on a single row.
    pub async fn get_or_create_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Boq, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO boqs (project_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_boqs_project DO NOTHING",
        )
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::debug!(%project_id, "Created draft BOQ for project");
        }

        let query = format!("SELECT {COLUMNS} FROM boqs WHERE project_id = $1");
        sqlx::query_as::<_, Boq>(&query)
            .bind(project_id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Boq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boqs WHERE id = $1");
        sqlx::query_as::<_, Boq>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a BOQ and lock it until the surrounding transaction ends.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Boq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boqs WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Boq>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Option<Boq>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boqs WHERE project_id = $1");
        sqlx::query_as::<_, Boq>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Update draft fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateBoq,
    ) -> Result<Option<Boq>, sqlx::Error> {
        let query = format!(
            "UPDATE boqs SET
                selling_general_cost = COALESCE($2, selling_general_cost),
                complete_step = COALESCE($3, complete_step),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Boq>(&query)
            .bind(id)
            .bind(input.selling_general_cost)
            .bind(input.complete_step)
            .fetch_optional(executor)
            .await
    }

    /// Flip a draft BOQ to approved. Returns `None` if it was not draft.
    pub async fn approve(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Boq>, sqlx::Error> {
        let query = format!(
            "UPDATE boqs SET status = 'approved', updated_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Boq>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    // ── Job lines ────────────────────────────────────────────────────

    /// List a BOQ's job lines ordered by job name.
    pub async fn list_jobs(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
    ) -> Result<Vec<BoqJob>, sqlx::Error> {
        let query = format!(
            "SELECT {JOB_COLUMNS}
             FROM boq_jobs bj JOIN jobs j ON j.id = bj.job_id
             WHERE bj.boq_id = $1
             ORDER BY j.name"
        );
        sqlx::query_as::<_, BoqJob>(&query)
            .bind(boq_id)
            .fetch_all(executor)
            .await
    }

    pub async fn add_job(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
        input: &CreateBoqJob,
    ) -> Result<BoqJob, sqlx::Error> {
        let query = format!(
            "WITH bj AS (
                INSERT INTO boq_jobs (boq_id, job_id, quantity, labor_cost, selling_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
             )
             SELECT {JOB_COLUMNS} FROM bj JOIN jobs j ON j.id = bj.job_id"
        );
        sqlx::query_as::<_, BoqJob>(&query)
            .bind(boq_id)
            .bind(input.job_id)
            .bind(input.quantity)
            .bind(input.labor_cost)
            .bind(input.selling_price)
            .fetch_one(executor)
            .await
    }

    /// Update a job line. Returns `None` if the line is not part of `boq_id`.
    pub async fn update_job(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
        boq_job_id: DbId,
        input: &UpdateBoqJob,
    ) -> Result<Option<BoqJob>, sqlx::Error> {
        let query = format!(
            "WITH bj AS (
                UPDATE boq_jobs SET
                    quantity = COALESCE($3, quantity),
                    labor_cost = COALESCE($4, labor_cost),
                    selling_price = COALESCE($5, selling_price),
                    updated_at = NOW()
                WHERE id = $2 AND boq_id = $1
                RETURNING *
             )
             SELECT {JOB_COLUMNS} FROM bj JOIN jobs j ON j.id = bj.job_id"
        );
        sqlx::query_as::<_, BoqJob>(&query)
            .bind(boq_id)
            .bind(boq_job_id)
            .bind(input.quantity)
            .bind(input.labor_cost)
            .bind(input.selling_price)
            .fetch_optional(executor)
            .await
    }

    /// Remove a job line. Returns `true` if a row was removed.
    pub async fn delete_job(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
        boq_job_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boq_jobs WHERE id = $2 AND boq_id = $1")
            .bind(boq_id)
            .bind(boq_job_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
