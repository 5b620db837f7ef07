//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is editable

pub mod boq;
pub mod catalog;
pub mod client;
pub mod contract;
pub mod general_cost;
pub mod invoice;
pub mod material_price_log;
pub mod project;
pub mod quotation;
