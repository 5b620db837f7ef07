pub mod boq;
pub mod contract;
pub mod cost_type;
pub mod general_cost;
pub mod health;
pub mod invoice;
pub mod job;
pub mod material;
pub mod material_price_log;
pub mod project;
pub mod quotation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects                                   list, create
/// /projects/{id}                              get
/// /projects/{id}/status                       status transition (PUT)
/// /projects/{id}/overview                     overview
/// /projects/{id}/summary                      estimated vs actual cost
///
/// /boqs/project/{project_id}                  get-or-create BOQ
/// /boqs/{id}                                  get, update
/// /boqs/{id}/approve                          approve (PUT)
/// /boqs/{id}/jobs                             add job line (POST)
/// /boqs/{id}/jobs/{boq_job_id}                update, remove job line
///
/// /types                                      list, create
/// /general-costs/boq/{boq_id}                 synchronize + list, add
/// /general-costs/{id}                         remove
/// /general-costs/{id}/estimated               update estimated (PUT)
/// /general-costs/{id}/actual                  update actual (PUT)
///
/// /jobs                                       list, create
/// /jobs/{id}/materials                        list, add material
/// /materials                                  list, create
/// /material-price-logs                        append (POST)
/// /material-price-logs/boq/{boq_id}           list
///
/// /quotations/projects/{project_id}           compute (POST), get, update
/// /quotations/projects/{project_id}/approve   approve (PUT)
/// /quotations/projects/{project_id}/export    export
///
/// /contracts/projects/{project_id}            create, get
/// /contracts/{id}/periods                     create period, list
///
/// /invoices/{id}                              create batch (POST, id = project),
///                                             get, update, delete
/// /invoices/{id}/status                       status change (PUT)
/// /invoices/project/{project_id}              list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/boqs", boq::router())
        .nest("/types", cost_type::router())
        .nest("/general-costs", general_cost::router())
        .nest("/jobs", job::router())
        .nest("/materials", material::router())
        .nest("/material-price-logs", material_price_log::router())
        .nest("/quotations", quotation::router())
        .nest("/contracts", contract::router())
        .nest("/invoices", invoice::router())
}
