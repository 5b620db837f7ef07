//! Pure domain logic for the bidding workflow.
//!
//! Nothing in this crate touches the database or the network. Status rules,
//! quotation arithmetic and invoice checks live here so both the repository
//! layer and the HTTP layer share one definition of each rule.

pub mod error;
pub mod general_cost;
pub mod invoice;
pub mod money;
pub mod project_summary;
pub mod quotation;
pub mod status;
pub mod types;
