//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods.
//! Single-statement methods accept any [`sqlx::PgExecutor`] so they run
//! equally against the pool or inside a transaction (`&mut *tx`).
//! Methods that issue several statements take `&mut PgConnection` and are
//! expected to be called inside a transaction by the workflow layer.

pub mod boq_repo;
pub mod catalog_repo;
pub mod client_repo;
pub mod contract_repo;
pub mod general_cost_repo;
pub mod invoice_repo;
pub mod material_price_log_repo;
pub mod project_repo;
pub mod quotation_repo;

pub use boq_repo::BoqRepo;
pub use catalog_repo::{JobRepo, MaterialRepo};
pub use client_repo::ClientRepo;
pub use contract_repo::{ContractRepo, PeriodRepo};
pub use general_cost_repo::{CostTypeRepo, GeneralCostRepo};
pub use invoice_repo::InvoiceRepo;
pub use material_price_log_repo::MaterialPriceLogRepo;
pub use project_repo::ProjectRepo;
pub use quotation_repo::QuotationRepo;
