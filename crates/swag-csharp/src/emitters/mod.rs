pub mod fragments;
pub mod models;
pub mod services;

pub use fragments::{SourceUnit, UnitRenderer};
pub use models::{ModelContext, emit_model};
pub use services::{ServiceContext, emit_implementation, emit_interface, plan_methods};
