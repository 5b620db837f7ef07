//! Repository for the `clients` table.

use bidflow_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::client::{Client, CreateClient};

const COLUMNS: &str = "id, name, address, email, phone, tax_id, created_at, updated_at";

/// Minimal access to clients: the workflow only reads them for document headers.
pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, address, email, phone, tax_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.tax_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
