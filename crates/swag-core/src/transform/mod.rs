pub mod categorizer;
pub mod classifier;
pub mod endpoint_grouper;
pub mod fields;
pub mod inventory;
pub mod name_normalizer;
pub mod requirement;
pub mod spec_to_ir;
pub mod type_resolver;

pub use spec_to_ir::transform;
