pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod report;
pub mod transform;

pub use report::{Diagnostic, GeneratedFile, GenerationReport, ItemOutcome, Severity};

/// Trait for code generators that produce files from a transformed spec.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &ir::SwagSpec,
        config: &Self::Config,
    ) -> Result<GenerationReport, Self::Error>;
}
