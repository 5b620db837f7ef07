pub mod boq;
pub mod contract;
pub mod cost_type;
pub mod general_cost;
pub mod invoice;
pub mod job;
pub mod material;
pub mod material_price_log;
pub mod project;
pub mod quotation;
