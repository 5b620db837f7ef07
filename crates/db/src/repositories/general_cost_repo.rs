//! Repositories for the `types` catalog and `general_costs` table.

use bidflow_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor};

use crate::models::general_cost::{CostType, CreateGeneralCost, GeneralCost};

const COLUMNS: &str =
    "id, boq_id, type_name, estimated_cost, actual_cost, created_at, updated_at";

/// Access to the global general-cost type catalog.
pub struct CostTypeRepo;

impl CostTypeRepo {
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<CostType>, sqlx::Error> {
        sqlx::query_as::<_, CostType>("SELECT name, created_at FROM types ORDER BY name")
            .fetch_all(executor)
            .await
    }

    pub async fn create(
        executor: impl PgExecutor<'_>,
        name: &str,
    ) -> Result<CostType, sqlx::Error> {
        sqlx::query_as::<_, CostType>(
            "INSERT INTO types (name) VALUES ($1) RETURNING name, created_at",
        )
        .bind(name)
        .fetch_one(executor)
        .await
    }

    pub async fn exists(executor: impl PgExecutor<'_>, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM types WHERE name = $1)")
            .bind(name)
            .fetch_one(executor)
            .await
    }
}

/// Provides general-cost operations, including catalog synchronization.
pub struct GeneralCostRepo;

impl GeneralCostRepo {
    /// Make sure the BOQ has one general cost per catalog type, then return
    /// all of them ordered by type name.
    ///
    /// Missing types are inserted with zero estimated and actual cost. The
    /// BOQ row is locked first so concurrent first reads of the same BOQ run
    /// one after the other.
    pub async fn ensure_for_boq(
        conn: &mut PgConnection,
        boq_id: DbId,
    ) -> Result<Vec<GeneralCost>, sqlx::Error> {
        sqlx::query("SELECT id FROM boqs WHERE id = $1 FOR UPDATE")
            .bind(boq_id)
            .fetch_one(&mut *conn)
            .await?;

        let types: Vec<String> = sqlx::query_scalar("SELECT name FROM types ORDER BY name")
            .fetch_all(&mut *conn)
            .await?;

        let existing: Vec<String> =
            sqlx::query_scalar("SELECT type_name FROM general_costs WHERE boq_id = $1")
                .bind(boq_id)
                .fetch_all(&mut *conn)
                .await?;

        let missing: Vec<&String> = types.iter().filter(|t| !existing.contains(t)).collect();
        for type_name in &missing {
            sqlx::query(
                "INSERT INTO general_costs (boq_id, type_name, estimated_cost, actual_cost)
                 VALUES ($1, $2, 0, 0)
                 ON CONFLICT ON CONSTRAINT uq_general_costs_boq_type DO NOTHING",
            )
            .bind(boq_id)
            .bind(type_name.as_str())
            .execute(&mut *conn)
            .await?;
        }

        if !missing.is_empty() {
            tracing::debug!(%boq_id, created = missing.len(), "Synchronized general costs");
        }

        Self::list_by_boq(&mut *conn, boq_id).await
    }

    pub async fn list_by_boq(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
    ) -> Result<Vec<GeneralCost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM general_costs WHERE boq_id = $1 ORDER BY type_name");
        sqlx::query_as::<_, GeneralCost>(&query)
            .bind(boq_id)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<GeneralCost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM general_costs WHERE id = $1");
        sqlx::query_as::<_, GeneralCost>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a general cost for one type. A second row for the same
    /// (boq, type) violates `uq_general_costs_boq_type`.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
        input: &CreateGeneralCost,
    ) -> Result<GeneralCost, sqlx::Error> {
        let query = format!(
            "INSERT INTO general_costs (boq_id, type_name, estimated_cost)
             VALUES ($1, $2, COALESCE($3, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneralCost>(&query)
            .bind(boq_id)
            .bind(&input.type_name)
            .bind(input.estimated_cost)
            .fetch_one(executor)
            .await
    }

    pub async fn update_estimated(
        executor: impl PgExecutor<'_>,
        id: DbId,
        value: Decimal,
    ) -> Result<Option<GeneralCost>, sqlx::Error> {
        let query = format!(
            "UPDATE general_costs SET estimated_cost = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneralCost>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(executor)
            .await
    }

    pub async fn update_actual(
        executor: impl PgExecutor<'_>,
        id: DbId,
        value: Decimal,
    ) -> Result<Option<GeneralCost>, sqlx::Error> {
        let query = format!(
            "UPDATE general_costs SET actual_cost = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GeneralCost>(&query)
            .bind(id)
            .bind(value)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM general_costs WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
