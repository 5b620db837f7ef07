//! Repository for the append-only `material_price_logs` table.

use bidflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::material_price_log::{
    CreateMaterialPriceLog, JobActualPriceRow, MaterialPriceLog,
};

const COLUMNS: &str = "id, material_id, boq_id, job_id, purchase_order, quantity, \
    estimated_price, actual_price, sale_price, created_at";

pub struct MaterialPriceLogRepo;

impl MaterialPriceLogRepo {
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateMaterialPriceLog,
    ) -> Result<MaterialPriceLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO material_price_logs
                (material_id, boq_id, job_id, purchase_order, quantity,
                 estimated_price, actual_price, sale_price)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialPriceLog>(&query)
            .bind(input.material_id)
            .bind(input.boq_id)
            .bind(input.job_id)
            .bind(&input.purchase_order)
            .bind(input.quantity)
            .bind(input.estimated_price)
            .bind(input.actual_price)
            .bind(input.sale_price)
            .fetch_one(executor)
            .await
    }

    /// All logs of a BOQ, oldest first.
    pub async fn list_by_boq(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
    ) -> Result<Vec<MaterialPriceLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM material_price_logs
             WHERE boq_id = $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, MaterialPriceLog>(&query)
            .bind(boq_id)
            .fetch_all(executor)
            .await
    }

    /// Sum actual prices per job and count the logs still lacking one.
    pub async fn job_actuals(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
    ) -> Result<Vec<JobActualPriceRow>, sqlx::Error> {
        sqlx::query_as::<_, JobActualPriceRow>(
            "SELECT l.job_id,
                    j.name AS job_name,
                    COALESCE(SUM(l.actual_price), 0) AS actual_material_cost,
                    COUNT(*) FILTER (WHERE l.actual_price IS NULL) AS missing_prices
             FROM material_price_logs l
             JOIN jobs j ON j.id = l.job_id
             WHERE l.boq_id = $1
             GROUP BY l.job_id, j.name
             ORDER BY j.name",
        )
        .bind(boq_id)
        .fetch_all(executor)
        .await
    }
}
