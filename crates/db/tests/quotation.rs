//! Integration tests for the quotation line reads.
//!
//! - changing one BOQ line's quantity moves only that line's total
//! - an approved quotation's lines ignore price logs recorded later

use bidflow_core::quotation::{compute_line, QuotationLine};
use bidflow_core::types::DbId;
use bidflow_db::models::boq::{CreateBoqJob, UpdateBoqJob};
use bidflow_db::models::catalog::{CreateJob, CreateMaterial};
use bidflow_db::models::material_price_log::CreateMaterialPriceLog;
use bidflow_db::models::project::CreateProject;
use bidflow_db::repositories::{
    BoqRepo, JobRepo, MaterialPriceLogRepo, MaterialRepo, ProjectRepo, QuotationRepo,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sqlx::PgPool;

struct PricedBoq {
    project_id: DbId,
    boq_id: DbId,
    boq_job_id: DbId,
    job_id: DbId,
    material_id: DbId,
}

/// BOQ with one line (quantity 2, labor 100) and one price log (estimate 50).
async fn setup(pool: &PgPool, name: &str) -> PricedBoq {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
            client_id: None,
            address: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let boq = BoqRepo::get_or_create_for_project(&mut conn, project.id)
        .await
        .unwrap();

    let job = JobRepo::create(
        pool,
        &CreateJob {
            name: format!("{name} slab"),
            unit: "m3".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    let material = MaterialRepo::create(
        pool,
        &CreateMaterial {
            name: format!("{name} cement"),
            unit: "bag".to_string(),
        },
    )
    .await
    .unwrap();

    let line = BoqRepo::add_job(
        pool,
        boq.id,
        &CreateBoqJob {
            job_id: job.id,
            quantity: dec!(2),
            labor_cost: dec!(100),
            selling_price: None,
        },
    )
    .await
    .unwrap();

    let priced = PricedBoq {
        project_id: project.id,
        boq_id: boq.id,
        boq_job_id: line.id,
        job_id: job.id,
        material_id: material.id,
    };
    add_log(pool, &priced, dec!(50)).await;
    priced
}

async fn add_log(pool: &PgPool, boq: &PricedBoq, estimated_price: Decimal) {
    MaterialPriceLogRepo::create(
        pool,
        &CreateMaterialPriceLog {
            material_id: boq.material_id,
            boq_id: boq.boq_id,
            job_id: boq.job_id,
            purchase_order: None,
            quantity: None,
            estimated_price,
            actual_price: None,
            sale_price: None,
        },
    )
    .await
    .unwrap();
}

async fn priced_lines(
    pool: &PgPool,
    boq_id: DbId,
    as_of: Option<bidflow_core::types::Timestamp>,
) -> Vec<QuotationLine> {
    QuotationRepo::line_rows(pool, boq_id, as_of)
        .await
        .unwrap()
        .into_iter()
        .map(|row| compute_line(&row.into()))
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_quantity_change_moves_only_the_line_total(pool: PgPool) {
    let boq = setup(&pool, "Quantity").await;

    let before = priced_lines(&pool, boq.boq_id, None).await;
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].line_total, dec!(300));

    BoqRepo::update_job(
        &pool,
        boq.boq_id,
        boq.boq_job_id,
        &UpdateBoqJob {
            quantity: Some(dec!(3)),
            ..UpdateBoqJob::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let after = priced_lines(&pool, boq.boq_id, None).await;
    assert_eq!(after[0].line_total, dec!(450));
    assert_eq!(after[0].labor_cost, before[0].labor_cost);
    assert_eq!(after[0].total_material_cost, before[0].total_material_cost);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approved_lines_ignore_later_price_logs(pool: PgPool) {
    let boq = setup(&pool, "Frozen").await;
    let mut conn = pool.acquire().await.unwrap();
    let valid_date = sqlx::query_scalar("SELECT NOW() + INTERVAL '1 month'")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    QuotationRepo::get_or_create_for_project(&mut conn, boq.project_id, dec!(7), valid_date)
        .await
        .unwrap();

    let approved = QuotationRepo::approve(&pool, boq.project_id, dec!(321))
        .await
        .unwrap()
        .unwrap();
    assert!(approved.approved_at.is_some());

    add_log(&pool, &boq, dec!(80)).await;

    let frozen = priced_lines(&pool, boq.boq_id, approved.approved_at).await;
    assert_eq!(frozen[0].total_material_cost, dec!(50));
    assert_eq!(frozen[0].line_total, dec!(300));

    let current = priced_lines(&pool, boq.boq_id, None).await;
    assert_eq!(current[0].total_material_cost, dec!(130));
}
