//! End-to-end tests of the BOQ → quotation → invoice lifecycle over HTTP.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, data_id, decimal, delete, get, post_empty, post_json, put_empty, put_json,
};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Ids of a project with one BOQ job line priced by one material log.
struct Seeded {
    project_id: String,
    boq_id: String,
    boq_job_id: String,
    job_id: String,
    material_id: String,
}

async fn create_project(app: &Router, name: &str) -> String {
    let response = post_json(app.clone(), "/api/v1/projects", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    data_id(&body_json(response).await)
}

/// Project with a draft BOQ holding one job line: `quantity` x labor 100,
/// plus one material price log with estimated price 50.
async fn seed(app: &Router, name: &str, quantity: &str) -> Seeded {
    let project_id = create_project(app, name).await;

    let response = get(app.clone(), &format!("/api/v1/boqs/project/{project_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let boq_id = data_id(&body_json(response).await);

    let job = post_json(
        app.clone(),
        "/api/v1/jobs",
        json!({ "name": format!("{name} concrete"), "unit": "m3" }),
    )
    .await;
    assert_eq!(job.status(), StatusCode::CREATED);
    let job_id = data_id(&body_json(job).await);

    let material = post_json(
        app.clone(),
        "/api/v1/materials",
        json!({ "name": format!("{name} cement"), "unit": "bag" }),
    )
    .await;
    let material_id = data_id(&body_json(material).await);

    let line = post_json(
        app.clone(),
        &format!("/api/v1/boqs/{boq_id}/jobs"),
        json!({ "job_id": job_id, "quantity": quantity, "labor_cost": "100" }),
    )
    .await;
    assert_eq!(line.status(), StatusCode::CREATED);
    let boq_job_id = data_id(&body_json(line).await);

    let seeded = Seeded {
        project_id,
        boq_id,
        boq_job_id,
        job_id,
        material_id,
    };
    add_price_log(app, &seeded, json!({ "estimated_price": "50" })).await;
    seeded
}

/// Record a material price log against the seeded job. `prices` holds the
/// price fields of the request.
async fn add_price_log(app: &Router, seeded: &Seeded, prices: Value) {
    let mut body = json!({
        "material_id": seeded.material_id,
        "boq_id": seeded.boq_id,
        "job_id": seeded.job_id,
    });
    if let (Some(fields), Some(prices)) = (body.as_object_mut(), prices.as_object()) {
        fields.extend(prices.clone());
    }
    let response = post_json(app.clone(), "/api/v1/material-price-logs", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn approve_boq(app: &Router, boq_id: &str) {
    let response = put_empty(app.clone(), &format!("/api/v1/boqs/{boq_id}/approve")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn approve_quotation(app: &Router, project_id: &str) {
    let uri = format!("/api/v1/quotations/projects/{project_id}");
    let compute = post_empty(app.clone(), &uri).await;
    assert_eq!(compute.status(), StatusCode::OK);
    let approve = put_empty(
        app.clone(),
        &format!("/api/v1/quotations/projects/{project_id}/approve"),
    )
    .await;
    assert_eq!(approve.status(), StatusCode::OK);
}

/// Fully approved project with a contract of `periods` periods.
/// Returns (project_id, contract_id).
async fn seed_contract(app: &Router, name: &str, periods: i32) -> (String, String) {
    let seeded = seed(app, name, "2").await;
    approve_boq(app, &seeded.boq_id).await;
    approve_quotation(app, &seeded.project_id).await;

    let contract = post_json(
        app.clone(),
        &format!("/api/v1/contracts/projects/{}", seeded.project_id),
        json!({ "contract_number": format!("C-{name}") }),
    )
    .await;
    assert_eq!(contract.status(), StatusCode::CREATED);
    let contract_id = data_id(&body_json(contract).await);

    for n in 1..=periods {
        let period = post_json(
            app.clone(),
            &format!("/api/v1/contracts/{contract_id}/periods"),
            json!({
                "period_number": n,
                "amount": "100",
                "jobs": [{ "boq_job_id": seeded.boq_job_id, "amount": "100" }]
            }),
        )
        .await;
        assert_eq!(period.status(), StatusCode::CREATED);
    }

    (seeded.project_id, contract_id)
}

// ---------------------------------------------------------------------------
// BOQ and general costs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn boq_access_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let project_id = create_project(&app, "Idempotent").await;
    let uri = format!("/api/v1/boqs/project/{project_id}");

    let first = data_id(&body_json(get(app.clone(), &uri).await).await);
    let second = data_id(&body_json(get(app.clone(), &uri).await).await);
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_boq_rejects_edits(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Frozen", "2").await;
    approve_boq(&app, &seeded.boq_id).await;

    let edit = put_json(
        app.clone(),
        &format!("/api/v1/boqs/{}/jobs/{}", seeded.boq_id, seeded.boq_job_id),
        json!({ "quantity": "5" }),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(edit).await["code"], "INVALID_STATE");

    let again = put_empty(app.clone(), &format!("/api/v1/boqs/{}/approve", seeded.boq_id)).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn general_costs_cover_every_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Costs", "1").await;
    let uri = format!("/api/v1/general-costs/boq/{}", seeded.boq_id);

    let first = body_json(get(app.clone(), &uri).await).await;
    let costs = first["data"].as_array().unwrap();
    assert_eq!(costs.len(), 2);
    assert_eq!(costs[0]["type_name"], "overhead");
    assert_eq!(costs[1]["type_name"], "transport");

    let second = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(first["data"], second["data"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn actual_cost_waits_for_approvals(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Actual", "1").await;

    let costs = body_json(
        get(app.clone(), &format!("/api/v1/general-costs/boq/{}", seeded.boq_id)).await,
    )
    .await;
    let cost_id = costs["data"][0]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/general-costs/{cost_id}/actual");

    let early = put_json(app.clone(), &uri, json!({ "value": "10" })).await;
    assert_eq!(early.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(early).await["code"], "INVALID_STATE");

    approve_boq(&app, &seeded.boq_id).await;
    approve_quotation(&app, &seeded.project_id).await;

    let ok = put_json(app.clone(), &uri, json!({ "value": "10" })).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(decimal(&body_json(ok).await["data"]["actual_cost"]), dec!(10));

    let estimated = put_json(
        app.clone(),
        &format!("/api/v1/general-costs/{cost_id}/estimated"),
        json!({ "value": "20" }),
    )
    .await;
    assert_eq!(estimated.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_type_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app.clone(), "/api/v1/types", json!({ "name": "overhead" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Quotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn quotation_requires_approved_boq(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Unapproved", "2").await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/quotations/projects/{}", seeded.project_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quotation_totals_follow_quantity(pool: PgPool) {
    let app = common::build_test_app(pool);

    for (name, quantity, expected) in [("Two", "2", dec!(300)), ("Three", "3", dec!(450))] {
        let seeded = seed(&app, name, quantity).await;
        approve_boq(&app, &seeded.boq_id).await;

        let response = post_empty(
            app.clone(),
            &format!("/api/v1/quotations/projects/{}", seeded.project_id),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        assert_eq!(decimal(&json["data"]["lines"][0]["line_total"]), expected);
        assert_eq!(json["data"]["quotation"]["status"], "draft");
        assert_eq!(decimal(&json["data"]["quotation"]["tax_percentage"]), dec!(7));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn quotation_approval_is_one_shot(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "OneShot", "2").await;
    approve_boq(&app, &seeded.boq_id).await;
    approve_quotation(&app, &seeded.project_id).await;

    let uri = format!("/api/v1/quotations/projects/{}/approve", seeded.project_id);
    let again = put_empty(app.clone(), &uri).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(again).await["error"],
        "no draft quotation found to approve"
    );

    // Two general costs at zero: final amount is 300 plus 7% tax.
    let export = get(
        app.clone(),
        &format!("/api/v1/quotations/projects/{}/export", seeded.project_id),
    )
    .await;
    assert_eq!(export.status(), StatusCode::OK);
    let json = body_json(export).await;
    assert_eq!(decimal(&json["data"]["amount"]["final_amount"]), dec!(321));
    assert_eq!(json["data"]["project_name"], "OneShot");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn draft_quotation_follows_new_price_logs(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Moving", "2").await;
    approve_boq(&app, &seeded.boq_id).await;
    let uri = format!("/api/v1/quotations/projects/{}", seeded.project_id);

    let computed = body_json(post_empty(app.clone(), &uri).await).await;
    assert_eq!(decimal(&computed["data"]["lines"][0]["line_total"]), dec!(300));

    add_price_log(&app, &seeded, json!({ "estimated_price": "25" })).await;

    let reread = body_json(get(app.clone(), &uri).await).await;
    let line = &reread["data"]["lines"][0];
    assert_eq!(decimal(&line["total_material_cost"]), dec!(75));
    assert_eq!(decimal(&line["line_total"]), dec!(350));
    assert_eq!(reread["data"]["quotation"]["status"], "draft");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approved_quotation_ignores_later_price_logs(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Frozen quote", "2").await;
    approve_boq(&app, &seeded.boq_id).await;
    approve_quotation(&app, &seeded.project_id).await;

    add_price_log(
        &app,
        &seeded,
        json!({ "estimated_price": "80", "actual_price": "80" }),
    )
    .await;

    let uri = format!("/api/v1/quotations/projects/{}", seeded.project_id);
    let view = body_json(get(app.clone(), &uri).await).await;
    let stored = decimal(&view["data"]["quotation"]["final_amount"]);
    assert_eq!(stored, dec!(321));
    assert_eq!(decimal(&view["data"]["lines"][0]["line_total"]), dec!(300));

    let export = get(app.clone(), &format!("{uri}/export")).await;
    assert_eq!(export.status(), StatusCode::OK);
    let json = body_json(export).await;
    assert_eq!(decimal(&json["data"]["amount"]["final_amount"]), stored);
    assert_eq!(decimal(&json["data"]["lines"][0]["line_total"]), dec!(300));
    assert_eq!(decimal(&json["data"]["totals"]["selling_total"]), dec!(300));
}

// ---------------------------------------------------------------------------
// Project status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_start_needs_approved_documents(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Start", "1").await;
    let uri = format!("/api/v1/projects/{}/status", seeded.project_id);

    let early = put_json(app.clone(), &uri, json!({ "status": "in_progress" })).await;
    assert_eq!(early.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(early).await["code"], "DEPENDENCY_NOT_APPROVED");

    approve_boq(&app, &seeded.boq_id).await;
    approve_quotation(&app, &seeded.project_id).await;

    let started = put_json(app.clone(), &uri, json!({ "status": "in_progress" })).await;
    assert_eq!(started.status(), StatusCode::OK);

    let completed = put_json(app.clone(), &uri, json!({ "status": "completed" })).await;
    assert_eq!(completed.status(), StatusCode::OK);

    let reopen = put_json(app.clone(), &uri, json!({ "status": "in_progress" })).await;
    assert_eq!(reopen.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(reopen).await["code"], "INVALID_TRANSITION");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_fails_closed_on_missing_actual_price(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Summary", "1").await;

    let response = get(
        app.clone(),
        &format!("/api/v1/projects/{}/summary", seeded.project_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "MISSING_PRICE_INFORMATION");
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoices_created_once_per_period(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (project_id, contract_id) = seed_contract(&app, "Batch", 3).await;
    let uri = format!("/api/v1/invoices/{project_id}");

    let response = post_json(app.clone(), &uri, json!({ "contract_id": contract_id })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let invoices = json["data"].as_array().unwrap();
    assert_eq!(invoices.len(), 3);
    assert!(invoices.iter().all(|i| i["status"] == "draft"));

    let again = post_json(app.clone(), &uri, json!({ "contract_id": contract_id })).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(again).await["error"],
        "no available periods found for invoicing"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_batch_is_all_or_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (project_id, contract_id) = seed_contract(&app, "Atomic", 3).await;

    sqlx::query(
        "CREATE FUNCTION fail_third_period() RETURNS trigger AS $$
         BEGIN
            IF (SELECT period_number FROM periods WHERE id = NEW.period_id) = 3 THEN
                RAISE EXCEPTION 'forced failure';
            END IF;
            RETURN NEW;
         END;
         $$ LANGUAGE plpgsql",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER fail_third_period BEFORE INSERT ON invoices
         FOR EACH ROW EXECUTE FUNCTION fail_third_period()",
    )
    .execute(&pool)
    .await
    .unwrap();

    let response = post_json(
        app.clone(),
        &format!("/api/v1/invoices/{project_id}"),
        json!({ "contract_id": contract_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_batch_checks_dependencies(pool: PgPool) {
    let app = common::build_test_app(pool);
    let seeded = seed(&app, "Blocked", "1").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/invoices/{}", seeded.project_id),
        json!({ "contract_id": "00000000-0000-0000-0000-000000000000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "boq is not approved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_approval_requires_fields_and_is_forward_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (project_id, contract_id) = seed_contract(&app, "Lifecycle", 1).await;

    let created = post_json(
        app.clone(),
        &format!("/api/v1/invoices/{project_id}"),
        json!({ "contract_id": contract_id }),
    )
    .await;
    let invoice_id = body_json(created).await["data"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let status_uri = format!("/api/v1/invoices/{invoice_id}/status");

    let incomplete = put_json(app.clone(), &status_uri, json!({ "status": "approved" })).await;
    assert_eq!(incomplete.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(incomplete).await["error"]
        .as_str()
        .unwrap()
        .contains("required fields are missing"));

    let empty = put_json(app.clone(), &format!("/api/v1/invoices/{invoice_id}"), json!({})).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let filled = put_json(
        app.clone(),
        &format!("/api/v1/invoices/{invoice_id}"),
        json!({
            "invoice_date": "2026-03-01",
            "payment_due_date": "2026-03-31",
            "payment_term": "30 days"
        }),
    )
    .await;
    assert_eq!(filled.status(), StatusCode::OK);

    let approved = put_json(app.clone(), &status_uri, json!({ "status": "approved" })).await;
    assert_eq!(approved.status(), StatusCode::OK);
    assert_eq!(body_json(approved).await["data"]["status"], "approved");

    let back = put_json(app.clone(), &status_uri, json!({ "status": "draft" })).await;
    assert_eq!(back.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(back).await["error"],
        "cannot change status from approved to draft"
    );

    let stored = body_json(get(app.clone(), &format!("/api/v1/invoices/{invoice_id}")).await).await;
    assert_eq!(stored["data"]["status"], "approved");

    let removed = delete(app.clone(), &format!("/api/v1/invoices/{invoice_id}")).await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
}
