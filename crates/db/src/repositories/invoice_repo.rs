//! Repository for the `invoices` table.
//!
//! Invoice rows are always returned joined with their period so callers see
//! the billed amount and period number.

use bidflow_core::status::DocumentStatus;
use bidflow_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::invoice::{Invoice, UpdateInvoice};

/// Select list for an invoice aliased `i` joined with its period `p`.
const JOINED_COLUMNS: &str = "i.id, i.project_id, i.period_id, p.period_number, p.amount, \
    i.status, i.invoice_date, i.payment_due_date, i.payment_term, i.paid_date, i.remarks, \
    i.created_at, i.updated_at";

pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert one draft invoice per period, all or nothing.
    ///
    /// Runs on the caller's connection; the caller owns the transaction so a
    /// failure on any period rolls back the whole batch.
    pub async fn create_for_periods(
        conn: &mut PgConnection,
        project_id: DbId,
        period_ids: &[DbId],
        payment_term: Option<&str>,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let mut ids = Vec::with_capacity(period_ids.len());
        for period_id in period_ids {
            let id: DbId = sqlx::query_scalar(
                "INSERT INTO invoices (project_id, period_id, payment_term)
                 VALUES ($1, $2, $3)
                 RETURNING id",
            )
            .bind(project_id)
            .bind(period_id)
            .bind(payment_term)
            .fetch_one(&mut *conn)
            .await?;
            ids.push(id);
        }

        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM invoices i JOIN periods p ON p.id = i.period_id
             WHERE i.id = ANY($1)
             ORDER BY p.period_number"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(&ids)
            .fetch_all(&mut *conn)
            .await
    }

    /// Periods of `contract_id` that already have an invoice.
    pub async fn invoiced_period_ids(
        executor: impl PgExecutor<'_>,
        contract_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT i.period_id
             FROM invoices i JOIN periods p ON p.id = i.period_id
             WHERE p.contract_id = $1",
        )
        .bind(contract_id)
        .fetch_all(executor)
        .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM invoices i JOIN periods p ON p.id = i.period_id
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an invoice and lock its row until the surrounding transaction ends.
    pub async fn find_by_id_for_update(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM invoices i JOIN periods p ON p.id = i.period_id
             WHERE i.id = $1
             FOR UPDATE OF i"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Invoices of a project ordered by period number.
    pub async fn list_by_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM invoices i JOIN periods p ON p.id = i.period_id
             WHERE i.project_id = $1
             ORDER BY p.period_number"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Apply the non-`None` fields of `input`.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateInvoice,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                UPDATE invoices SET
                    invoice_date = COALESCE($2, invoice_date),
                    payment_due_date = COALESCE($3, payment_due_date),
                    payment_term = COALESCE($4, payment_term),
                    paid_date = COALESCE($5, paid_date),
                    remarks = COALESCE($6, remarks),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM i JOIN periods p ON p.id = i.period_id"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(input.invoice_date)
            .bind(input.payment_due_date)
            .bind(&input.payment_term)
            .bind(input.paid_date)
            .bind(&input.remarks)
            .fetch_optional(executor)
            .await
    }

    pub async fn update_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: DocumentStatus,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                UPDATE invoices SET status = $2, updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {JOINED_COLUMNS} FROM i JOIN periods p ON p.id = i.period_id"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }

    /// Delete an invoice. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
