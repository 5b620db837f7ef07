//! Repository for the `quotations` table and the BOQ reads that feed it.

use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor};

use crate::models::quotation::{
    Quotation, QuotationExportHeader, QuotationLineRow, UpdateQuotation,
};

const COLUMNS: &str = "id, project_id, status, valid_date, tax_percentage, final_amount, \
                       approved_at, created_at, updated_at";

pub struct QuotationRepo;

impl QuotationRepo {
    /// Return the project's quotation, creating a draft with the given
    /// defaults if none exists. Safe under concurrent first reads.
    pub async fn get_or_create_for_project(
        conn: &mut PgConnection,
        project_id: DbId,
        tax_percentage: Decimal,
        valid_date: Timestamp,
    ) -> Result<Quotation, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO quotations (project_id, valid_date, tax_percentage)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_quotations_project DO NOTHING",
        )
        .bind(project_id)
        .bind(valid_date)
        .bind(tax_percentage)
        .execute(&mut *conn)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::debug!(%project_id, "Created draft quotation for project");
        }

        let query = format!("SELECT {COLUMNS} FROM quotations WHERE project_id = $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(project_id)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotations WHERE project_id = $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }

    /// Update draft fields. Only non-`None` fields in `input` are applied.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateQuotation,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!(
            "UPDATE quotations SET
                valid_date = COALESCE($2, valid_date),
                tax_percentage = COALESCE($3, tax_percentage),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .bind(input.valid_date)
            .bind(input.tax_percentage)
            .fetch_optional(executor)
            .await
    }

    /// Approve the project's draft quotation and record its final amount.
    ///
    /// Returns `None` when there is no draft quotation for the project,
    /// which makes a repeated approval observable to the caller.
    pub async fn approve(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        final_amount: Decimal,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!(
            "UPDATE quotations SET
                status = 'approved',
                final_amount = $2,
                approved_at = NOW(),
                updated_at = NOW()
             WHERE project_id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(project_id)
            .bind(final_amount)
            .fetch_optional(executor)
            .await
    }

    /// BOQ job lines with the summed estimated material price of each job,
    /// ordered by job name. Jobs without price logs get a `NULL` total.
    ///
    /// With `as_of` set, only price logs recorded at or before that instant
    /// count. An approved quotation passes its `approved_at` here.
    pub async fn line_rows(
        executor: impl PgExecutor<'_>,
        boq_id: DbId,
        as_of: Option<Timestamp>,
    ) -> Result<Vec<QuotationLineRow>, sqlx::Error> {
        sqlx::query_as::<_, QuotationLineRow>(
            "SELECT bj.id AS boq_job_id,
                    bj.job_id,
                    j.name AS job_name,
                    j.unit,
                    bj.quantity,
                    bj.labor_cost,
                    bj.selling_price,
                    m.total_material_cost
             FROM boq_jobs bj
             JOIN jobs j ON j.id = bj.job_id
             LEFT JOIN (
                SELECT job_id, boq_id, SUM(estimated_price) AS total_material_cost
                FROM material_price_logs
                WHERE boq_id = $1 AND ($2::timestamptz IS NULL OR created_at <= $2)
                GROUP BY job_id, boq_id
             ) m ON m.job_id = bj.job_id AND m.boq_id = bj.boq_id
             WHERE bj.boq_id = $1
             ORDER BY j.name",
        )
        .bind(boq_id)
        .bind(as_of)
        .fetch_all(executor)
        .await
    }

    /// Project and client fields printed on the quotation document.
    pub async fn export_header(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Option<QuotationExportHeader>, sqlx::Error> {
        sqlx::query_as::<_, QuotationExportHeader>(
            "SELECT p.id AS project_id,
                    p.name AS project_name,
                    p.address AS project_address,
                    c.name AS client_name,
                    c.address AS client_address,
                    c.email AS client_email,
                    c.phone AS client_phone,
                    c.tax_id AS client_tax_id
             FROM projects p
             LEFT JOIN clients c ON c.id = p.client_id
             WHERE p.id = $1",
        )
        .bind(project_id)
        .fetch_optional(executor)
        .await
    }
}
